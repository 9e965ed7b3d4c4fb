use thiserror::Error;

/// Result type for forest operations
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors that can occur while building or querying a test forest
#[derive(Error, Debug)]
pub enum TreeError {
    /// Node index does not exist in the arena
    #[error("Node not found: {0}")]
    NodeNotFound(usize),

    /// Child range is not contained within its parent's range
    #[error("Invalid range: child {child_start}..{child_end} outside parent {parent_start}..{parent_end}")]
    InvalidRange {
        child_start: usize,
        child_end: usize,
        parent_start: usize,
        parent_end: usize,
    },
}
