use thiserror::Error;

/// Result type for lens operations
pub type Result<T> = std::result::Result<T, LensError>;

/// Errors that can occur while loading the external action source.
///
/// These never escape enumeration; callers downgrade them to an empty
/// extra-action list with a single warning.
#[derive(Error, Debug)]
pub enum LensError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed action manifest
    #[error("Manifest error: {0}")]
    ManifestError(#[from] serde_json::Error),
}
