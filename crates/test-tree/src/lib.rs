//! # Testlens Tree
//!
//! Declaration forest for test files and line-to-test-name resolution.
//!
//! ## Architecture
//!
//! ```text
//! Parsed test file
//!     │
//!     ├──> TestForest (index-addressed arena)
//!     │      ├─ Nodes: suites, tests, assertions
//!     │      └─ Parent/child indices, 1-based inclusive ranges
//!     │
//!     └──> Locator
//!            ├─ Find deepest node containing a source line
//!            ├─ Walk ancestor chain root → node
//!            └─ Emit regex-escaped, space-joined full test name
//! ```

mod escape;
mod error;
mod locator;
mod types;

pub use error::{Result, TreeError};
pub use escape::escape_regex;
pub use locator::{full_test_name, locate};
pub use types::{NodeId, Position, TestForest, TestKind, TestNode};
