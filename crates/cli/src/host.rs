//! Host-side implementations of the dispatcher's collaborator traits.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use testlens_command::DebugSpec;
use testlens_runner::{
    ActiveDocument, DebugLauncher, DocumentHost, ExecutionSurface, Result, SurfaceFactory,
};

/// Document host backed by a file path and line from the command line
pub struct FileHost {
    path: PathBuf,
    line: usize,
}

impl FileHost {
    pub fn new(path: PathBuf, line: usize) -> Self {
        Self { path, line }
    }
}

#[async_trait]
impl DocumentHost for FileHost {
    async fn active_document(&self) -> Option<ActiveDocument> {
        Some(ActiveDocument {
            path: self.path.clone(),
            cursor_line: self.line,
            selection: None,
        })
    }

    async fn save_active(&self) -> Result<()> {
        // The file already lives on disk; nothing to persist.
        Ok(())
    }
}

/// Execution surface that buffers sent lines into a shared script.
///
/// The dispatcher drives the full clear/show/send lifecycle; the CLI then
/// prints the script or hands it to a shell in one go.
pub struct ScriptSurface {
    lines: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ExecutionSurface for ScriptSurface {
    async fn show(&mut self) -> Result<()> {
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        Ok(())
    }

    async fn send_text(&mut self, text: &str) -> Result<()> {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(text.to_string());
        Ok(())
    }

    fn is_closed(&self) -> bool {
        false
    }
}

/// Factory producing [`ScriptSurface`]s over one shared line buffer
pub struct ScriptFactory {
    lines: Arc<Mutex<Vec<String>>>,
}

impl ScriptFactory {
    pub fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        (Self { lines: lines.clone() }, lines)
    }
}

impl SurfaceFactory for ScriptFactory {
    fn create(&self) -> Result<Box<dyn ExecutionSurface>> {
        Ok(Box::new(ScriptSurface {
            lines: self.lines.clone(),
        }))
    }
}

/// Debug "subsystem" that prints the launch configuration as JSON
pub struct PrintLauncher;

#[async_trait]
impl DebugLauncher for PrintLauncher {
    async fn launch(&self, spec: &DebugSpec) -> Result<()> {
        match serde_json::to_string_pretty(spec) {
            Ok(json) => println!("{json}"),
            Err(e) => log::warn!("Could not serialize launch spec: {e}"),
        }
        Ok(())
    }
}
