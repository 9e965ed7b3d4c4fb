use thiserror::Error;

/// Result type for command-building operations
pub type Result<T> = std::result::Result<T, CommandError>;

/// Errors that can occur while loading configuration or shaping a launch spec
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CommandError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
