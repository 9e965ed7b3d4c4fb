use crate::error::{CommandError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Static configuration for building run and debug invocations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunnerConfig {
    /// Command used to start jest from a terminal
    pub jest_command: String,

    /// Path to the jest binary handed to the debugger as `program`
    pub jest_bin_path: PathBuf,

    /// Project root; the execution surface is switched here before every run
    pub project_path: PathBuf,

    /// Optional jest config file passed as `-c`
    pub config_path: Option<PathBuf>,

    /// Options appended to every run
    pub run_options: Vec<String>,

    /// Overrides merged into the debug launch configuration
    pub debug_options: serde_json::Map<String, serde_json::Value>,

    /// Yarn Plug'n'Play compatibility: preload the PnP runtime when debugging
    pub yarn_pnp_support: bool,

    /// Alternate jest binary to debug under Yarn Plug'n'Play
    pub yarn_pnp_jest_bin: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            jest_command: "npx jest".to_string(),
            jest_bin_path: PathBuf::from("node_modules/.bin/jest"),
            project_path: PathBuf::from("."),
            config_path: None,
            run_options: Vec::new(),
            debug_options: serde_json::Map::new(),
            yarn_pnp_support: false,
            yarn_pnp_jest_bin: None,
        }
    }
}

impl RunnerConfig {
    /// Create a config rooted at a project directory
    pub fn for_project(project_path: impl Into<PathBuf>) -> Self {
        Self {
            project_path: project_path.into(),
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.jest_command.trim().is_empty() {
            return Err(CommandError::invalid_config("jestCommand must not be empty"));
        }
        if self.yarn_pnp_jest_bin.is_some() && !self.yarn_pnp_support {
            return Err(CommandError::invalid_config(
                "yarnPnpJestBin requires yarnPnpSupport",
            ));
        }
        Ok(())
    }
}
