//! # Testlens Runner
//!
//! Orchestrates "save → resolve test name → build command → remember →
//! execute" over a persistent execution surface, and replays the previous
//! invocation on request.
//!
//! ## Architecture
//!
//! ```text
//! DocumentHost (active file, cursor, selection)
//!     │
//!     ├──> resolve test name (explicit > selection > locator)
//!     │
//!     ├──> ArgBuilder / DebugSpec (testlens-command)
//!     │
//!     ├──> PreviousInvocation (last command or launch spec)
//!     │
//!     └──> ExecutionSurface (lazy, recreated when closed)
//!          DebugLauncher  (external debug subsystem)
//! ```
//!
//! Externally contributed actions never inject code: a manifest entry names a
//! runner id, and the dispatcher resolves it against handlers the host
//! registered up front.

mod dispatcher;
mod error;
mod registry;
mod traits;

pub use dispatcher::{Dispatcher, PreviousInvocation};
pub use error::{Result, RunnerError};
pub use registry::{HandlerRegistry, RunnerCallback, RunnerContext};
pub use traits::{ActiveDocument, DebugLauncher, DocumentHost, ExecutionSurface, SurfaceFactory};
