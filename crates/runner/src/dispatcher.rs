use crate::error::{Result, RunnerError};
use crate::registry::{HandlerRegistry, RunnerContext};
use crate::traits::{ActiveDocument, DebugLauncher, DocumentHost, ExecutionSurface, SurfaceFactory};
use std::sync::Arc;
use testlens_command::{normalize_path, quote, unquote, ArgBuilder, DebugSpec, RunnerConfig};
use testlens_lens::ExternalActionSource;
use testlens_parser::TestFileParser;
use testlens_tree::locate;

/// The last dispatched invocation, replayed by [`Dispatcher::run_previous_test`]
#[derive(Debug, Clone, PartialEq)]
pub enum PreviousInvocation {
    /// Shell command text sent to the execution surface
    Command(String),
    /// Launch spec handed to the debug subsystem
    Debug(DebugSpec),
}

/// Orchestrates run and debug requests over a persistent execution surface.
///
/// Owns the surface handle (created lazily, forgotten when externally closed)
/// and the previous-invocation memory; both live exactly as long as the
/// dispatcher instance.
pub struct Dispatcher {
    config: RunnerConfig,
    host: Arc<dyn DocumentHost>,
    factory: Box<dyn SurfaceFactory>,
    launcher: Arc<dyn DebugLauncher>,
    externals: Arc<ExternalActionSource>,
    handlers: HandlerRegistry,
    surface: Option<Box<dyn ExecutionSurface>>,
    previous: Option<PreviousInvocation>,
}

impl Dispatcher {
    /// Create a dispatcher wired to its host collaborators
    pub fn new(
        config: RunnerConfig,
        host: Arc<dyn DocumentHost>,
        factory: Box<dyn SurfaceFactory>,
        launcher: Arc<dyn DebugLauncher>,
        externals: Arc<ExternalActionSource>,
    ) -> Self {
        Self {
            config,
            host,
            factory,
            launcher,
            externals,
            handlers: HandlerRegistry::new(),
            surface: None,
            previous: None,
        }
    }

    /// Registry of runner callbacks external actions may name
    pub fn handlers_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.handlers
    }

    /// The last recorded invocation, if any
    #[must_use]
    pub fn previous(&self) -> Option<&PreviousInvocation> {
        self.previous.as_ref()
    }

    /// Run the test under the cursor (or `explicit_name` when given)
    pub async fn run_current_test(&mut self, explicit_name: Option<&str>) -> Result<()> {
        self.run_current_test_ex(explicit_name, &[]).await
    }

    /// Run the current test with extra options merged into the option set
    pub async fn run_current_test_ex(
        &mut self,
        explicit_name: Option<&str>,
        extra_options: &[String],
    ) -> Result<()> {
        let Some(doc) = self.host.active_document().await else {
            return Ok(());
        };
        self.host.save_active().await?;

        let file_path = doc.path.to_string_lossy().to_string();
        let test_name = match explicit_name {
            Some(name) => Some(name.to_string()),
            None => self.resolve_test_name(&doc),
        };

        let command = ArgBuilder::new(&self.config)
            .command(&file_path, test_name.as_deref(), extra_options)
            .to_string();
        self.previous = Some(PreviousInvocation::Command(command.clone()));
        self.dispatch_command(&command).await
    }

    /// Run an externally contributed action with extra options merged in.
    ///
    /// When the matched manifest entry names a registered runner, that
    /// callback receives the resolved context instead of a direct dispatch.
    pub async fn run_with_options(&mut self, action: &str, extra_options: &[String]) -> Result<()> {
        let Some(doc) = self.host.active_document().await else {
            return Ok(());
        };
        self.host.save_active().await?;

        let file_path = doc.path.to_string_lossy().to_string();
        let test_name = self.resolve_test_name(&doc);
        let command = ArgBuilder::new(&self.config)
            .command(&file_path, test_name.as_deref(), extra_options)
            .to_string();

        let runner_id = self
            .externals
            .load()
            .await
            .as_ref()
            .and_then(|actions| actions.len_options.iter().find(|o| o.name == action))
            .and_then(|option| option.runner.clone());

        if let Some(callback) = runner_id.and_then(|id| self.handlers.get(&id)) {
            let context = RunnerContext {
                test_name,
                file_path,
                options: extra_options.to_vec(),
                command,
            };
            return callback.run(context).await;
        }

        self.previous = Some(PreviousInvocation::Command(command.clone()));
        self.dispatch_command(&command).await
    }

    /// Run the whole active file
    pub async fn run_current_file(&mut self, options: &[String]) -> Result<()> {
        let Some(doc) = self.host.active_document().await else {
            return Ok(());
        };
        self.host.save_active().await?;

        let file_path = doc.path.to_string_lossy().to_string();
        let command = ArgBuilder::new(&self.config)
            .command(&file_path, None, options)
            .to_string();
        self.previous = Some(PreviousInvocation::Command(command.clone()));
        self.dispatch_command(&command).await
    }

    /// Replay the previous invocation verbatim; no-op when none is recorded
    pub async fn run_previous_test(&mut self) -> Result<()> {
        match self.previous.clone() {
            Some(PreviousInvocation::Command(command)) => self.dispatch_command(&command).await,
            Some(PreviousInvocation::Debug(spec)) => self.launcher.launch(&spec).await,
            None => Ok(()),
        }
    }

    /// Debug the test under the cursor (or `explicit_name` when given)
    pub async fn debug_current_test(&mut self, explicit_name: Option<&str>) -> Result<()> {
        let Some(doc) = self.host.active_document().await else {
            return Ok(());
        };
        self.host.save_active().await?;

        let file_path = doc.path.to_string_lossy().to_string();
        let test_name = match explicit_name {
            Some(name) => Some(name.to_string()),
            None => self.resolve_test_name(&doc),
        };

        let spec = DebugSpec::build(&self.config, &file_path, test_name.as_deref())?;
        self.previous = Some(PreviousInvocation::Debug(spec.clone()));
        self.launcher.launch(&spec).await
    }

    /// Switch the surface to the project root and send the command text
    pub async fn dispatch_command(&mut self, command: &str) -> Result<()> {
        let project = normalize_path(&self.config.project_path.to_string_lossy());
        let cd = format!("cd {}", quote(&project));
        self.send_to_surface(&cd).await?;
        self.send_to_surface(command).await
    }

    /// Resolve the test name for a document: a non-empty selection is used
    /// verbatim (unquoted); otherwise the cursor line is located in the
    /// parsed file. Parse failures mean "no match", i.e. run the whole file.
    fn resolve_test_name(&self, doc: &ActiveDocument) -> Option<String> {
        if let Some(selection) = doc.selection.as_deref().filter(|s| !s.trim().is_empty()) {
            return Some(unquote(selection).to_string());
        }

        match TestFileParser::parse_file(&doc.path) {
            Ok(forest) => locate(doc.cursor_line, &forest),
            Err(e) => {
                log::debug!("Could not parse {}: {e}", doc.path.display());
                None
            }
        }
    }

    async fn send_to_surface(&mut self, text: &str) -> Result<()> {
        let needs_new = self.surface.as_ref().map_or(true, |s| s.is_closed());
        if needs_new {
            self.surface = Some(self.factory.create()?);
        }
        let surface = self
            .surface
            .as_mut()
            .ok_or_else(|| RunnerError::surface("execution surface unavailable"))?;
        surface.clear().await?;
        surface.show().await?;
        surface.send_text(text).await
    }
}
