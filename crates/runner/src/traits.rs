use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use testlens_command::DebugSpec;

/// The document a run or debug request applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDocument {
    /// Absolute path of the test file
    pub path: PathBuf,

    /// Cursor line (1-indexed)
    pub cursor_line: usize,

    /// Non-empty text selection, used verbatim as the test name
    pub selection: Option<String>,
}

/// Editor-side view of the active document
#[async_trait]
pub trait DocumentHost: Send + Sync {
    /// The currently focused document, `None` when the host is idle
    async fn active_document(&self) -> Option<ActiveDocument>;

    /// Persist the active document before running
    async fn save_active(&self) -> Result<()>;
}

/// A reusable interactive session that commands are sent to
#[async_trait]
pub trait ExecutionSurface: Send + Sync {
    /// Bring the surface to the foreground
    async fn show(&mut self) -> Result<()>;

    /// Clear previous output
    async fn clear(&mut self) -> Result<()>;

    /// Send one line of command text
    async fn send_text(&mut self, text: &str) -> Result<()>;

    /// Whether the surface was closed externally
    fn is_closed(&self) -> bool;
}

/// Creates execution surfaces on demand
pub trait SurfaceFactory: Send + Sync {
    /// Create a fresh surface
    fn create(&self) -> Result<Box<dyn ExecutionSurface>>;
}

/// External debug subsystem consuming launch specifications
#[async_trait]
pub trait DebugLauncher: Send + Sync {
    /// Start a debug session from a launch spec
    async fn launch(&self, spec: &DebugSpec) -> Result<()>;
}
