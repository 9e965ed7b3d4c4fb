//! # Testlens Lens
//!
//! Enumerates one group of actionable command descriptors per test
//! declaration: a fixed Run/Debug pair carrying the escaped full test name,
//! plus any extra actions contributed by an optional project-scoped manifest.
//!
//! ## Architecture
//!
//! ```text
//! TestForest
//!     │
//!     ├──> per-root tasks (spawned, joined in source order)
//!     │      ├─ children's groups first (post-order)
//!     │      ├─ fixed "Run" / "Debug" descriptors per node
//!     │      └─ extra descriptors from the external action source
//!     │
//!     └──> Vec<ActionGroup>, deterministic document order
//! ```
//!
//! The external source (`jestrunner.config.json`, discovered by walking from
//! the test file's directory up to the workspace root) is loaded lazily and
//! at most once; any load failure is downgraded to a single warning and an
//! empty extra-action list, never a hard error.

mod action;
mod enumerator;
mod error;
mod loader;

pub use action::{ActionGroup, ActionKind, FixedCommand, LensAction};
pub use enumerator::enumerate;
pub use error::{LensError, Result};
pub use loader::{find_config_file, ExternalActionSource, ExternalActions, LenOption, CONFIG_FILE_NAME};
