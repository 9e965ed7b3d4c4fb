use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Context bundle handed to a registered runner callback.
///
/// This is the whole capability surface an external action sees; it carries
/// the resolved request, never host internals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerContext {
    /// Resolved test name, `None` for a whole-file run
    pub test_name: Option<String>,

    /// Test file the request applies to
    pub file_path: String,

    /// Merged option set used for the build
    pub options: Vec<String>,

    /// The built shell command text
    pub command: String,
}

/// A host-registered callback backing an external action's `runner` id
#[async_trait]
pub trait RunnerCallback: Send + Sync {
    /// Handle the resolved request
    async fn run(&self, context: RunnerContext) -> Result<()>;
}

/// Maps runner ids from the action manifest to host-registered callbacks
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn RunnerCallback>>,
}

impl HandlerRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback under a runner id
    pub fn register(&mut self, id: impl Into<String>, callback: Arc<dyn RunnerCallback>) {
        self.handlers.insert(id.into(), callback);
    }

    /// Look up a callback by runner id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn RunnerCallback>> {
        self.handlers.get(id).cloned()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("ids", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
