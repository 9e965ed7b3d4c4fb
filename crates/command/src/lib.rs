//! # Testlens Command
//!
//! Builds the exact invocation needed to run or debug a single test: ordered
//! argument sequences with shell quoting for a terminal, or structured
//! argument arrays plus a launch configuration for a debugger.
//!
//! ## Token order
//!
//! ```text
//! <jest command> <file path> [-c <config>] [-t <test name>] <options...>
//! ```
//!
//! Options are the statically configured run options merged with per-call
//! extras, first-seen order preserved, deduplicated by exact value.

mod args;
mod config;
mod debug;
mod error;
mod shell;

pub use args::{ArgBuilder, RunCommand};
pub use config::RunnerConfig;
pub use debug::DebugSpec;
pub use error::{CommandError, Result};
pub use shell::{escape_plus_sign, escape_single_quotes, normalize_path, quote, unquote};
