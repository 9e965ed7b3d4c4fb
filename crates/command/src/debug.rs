use crate::args::ArgBuilder;
use crate::config::RunnerConfig;
use crate::error::Result;
use crate::shell::normalize_path;
use serde::{Deserialize, Serialize};

/// Structured launch configuration handed to the debug subsystem.
///
/// Serializes to the camelCase wire form a launch-config consumer expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugSpec {
    /// Console mode
    pub console: String,

    /// Internal-console policy
    pub internal_console_options: String,

    /// Display name of the launch
    pub name: String,

    /// Program path (the jest binary)
    pub program: String,

    /// Request kind, always "launch"
    pub request: String,

    /// Runtime type, always "node"
    #[serde(rename = "type")]
    pub runtime: String,

    /// Working directory
    pub cwd: String,

    /// Structured (unquoted) argument list
    #[serde(default)]
    pub args: Vec<String>,

    /// Runtime preload flags, only set under Yarn Plug'n'Play
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_args: Option<Vec<String>>,
}

impl DebugSpec {
    /// Build a launch spec for one test (or the whole file when `test_name`
    /// is `None`).
    ///
    /// Fixed launch defaults are merged with the configured `debugOptions`
    /// overrides, the Yarn-PnP compatibility substitutions are applied, and
    /// the standard argument sequence plus a forced `--runInBand` is
    /// appended after any override-supplied args.
    pub fn build(config: &RunnerConfig, file_path: &str, test_name: Option<&str>) -> Result<Self> {
        let mut spec = Self {
            console: "integratedTerminal".to_string(),
            internal_console_options: "neverOpen".to_string(),
            name: "Debug Jest Tests".to_string(),
            program: normalize_path(&config.jest_bin_path.to_string_lossy()),
            request: "launch".to_string(),
            runtime: "node".to_string(),
            cwd: normalize_path(&config.project_path.to_string_lossy()),
            args: Vec::new(),
            runtime_args: None,
        };

        if !config.debug_options.is_empty() {
            spec = spec.with_overrides(&config.debug_options)?;
        }

        if config.yarn_pnp_support {
            spec.runtime_args = Some(vec![
                "--require".to_string(),
                format!("{}/.pnp.js", spec.cwd),
            ]);
            if let Some(pnp_bin) = &config.yarn_pnp_jest_bin {
                spec.program = normalize_path(&pnp_bin.to_string_lossy());
            }
        }

        let standard = ArgBuilder::new(config).build(file_path, test_name, false, &[]);
        spec.args.extend(standard);
        spec.args.push("--runInBand".to_string());

        Ok(spec)
    }

    /// Merge configured launch overrides into this spec field-by-field
    fn with_overrides(self, overrides: &serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let mut value = serde_json::to_value(&self)?;
        if let Some(object) = value.as_object_mut() {
            for (key, override_value) in overrides {
                object.insert(key.clone(), override_value.clone());
            }
        }
        Ok(serde_json::from_value(value)?)
    }
}
