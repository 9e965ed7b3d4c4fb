use thiserror::Error;

/// Result type for dispatcher operations
pub type Result<T> = std::result::Result<T, RunnerError>;

/// Errors that can occur while dispatching a run or debug request
#[derive(Error, Debug)]
pub enum RunnerError {
    /// Execution surface could not be created or written to
    #[error("Surface error: {0}")]
    SurfaceError(String),

    /// Debug subsystem rejected the launch
    #[error("Debug launch error: {0}")]
    DebugError(String),

    /// Host failed to persist or expose the active document
    #[error("Host error: {0}")]
    HostError(String),

    /// Command construction error
    #[error("Command error: {0}")]
    CommandError(#[from] testlens_command::CommandError),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl RunnerError {
    /// Create a surface error
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::SurfaceError(msg.into())
    }

    /// Create a debug launch error
    pub fn debug(msg: impl Into<String>) -> Self {
        Self::DebugError(msg.into())
    }

    /// Create a host error
    pub fn host(msg: impl Into<String>) -> Self {
        Self::HostError(msg.into())
    }
}
