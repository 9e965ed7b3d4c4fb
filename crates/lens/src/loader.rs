use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use testlens_tree::TestKind;
use tokio::sync::OnceCell;

/// Fixed name of the project-scoped action manifest
pub const CONFIG_FILE_NAME: &str = "jestrunner.config.json";

/// One externally contributed action entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LenOption {
    /// Entry identifier
    pub name: String,

    /// Display title, defaults to the name
    #[serde(default)]
    pub title: Option<String>,

    /// Host action identifier, defaults to "run-with-options"
    #[serde(default)]
    pub command: Option<String>,

    /// Registered runner id to invoke instead of plain dispatch
    #[serde(default)]
    pub runner: Option<String>,

    /// Node kinds this entry applies to; empty means all runnable kinds
    #[serde(default)]
    pub kinds: Vec<String>,
}

impl LenOption {
    /// Display title for the descriptor
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Host action identifier for the descriptor
    #[must_use]
    pub fn command(&self) -> &str {
        self.command.as_deref().unwrap_or("run-with-options")
    }

    /// Check whether this entry applies to a node kind
    #[must_use]
    pub fn applies_to(&self, kind: TestKind) -> bool {
        self.kinds.is_empty() || self.kinds.iter().any(|k| k == kind.as_str())
    }
}

/// Contents of the action manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalActions {
    /// Extra per-node action entries
    #[serde(default)]
    pub len_options: Vec<LenOption>,
}

/// Walk from `start_dir` upward toward `workspace_root` looking for the
/// manifest. The first directory containing it wins; absence is not an
/// error, merely "no external actions".
#[must_use]
pub fn find_config_file(start_dir: &Path, workspace_root: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir == workspace_root {
            break;
        }
    }
    None
}

/// Lazily loaded, project-scoped source of extra lens actions.
///
/// The manifest is read at most once per source; a missing file yields no
/// entries and a malformed one is downgraded to a single warning.
#[derive(Debug)]
pub struct ExternalActionSource {
    start_dir: PathBuf,
    workspace_root: PathBuf,
    loaded: OnceCell<Option<ExternalActions>>,
}

impl ExternalActionSource {
    /// Create a source scoped to the active file's directory
    pub fn new(start_dir: impl Into<PathBuf>, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            start_dir: start_dir.into(),
            workspace_root: workspace_root.into(),
            loaded: OnceCell::new(),
        }
    }

    /// A source that never contributes entries
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(PathBuf::new(), PathBuf::new())
    }

    /// Entries applying to a node kind, in manifest order
    pub async fn entries_for(&self, kind: TestKind) -> Vec<LenOption> {
        match self.load().await {
            Some(actions) => actions
                .len_options
                .iter()
                .filter(|option| option.applies_to(kind))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// The loaded manifest, if any
    pub async fn load(&self) -> &Option<ExternalActions> {
        self.loaded
            .get_or_init(|| async {
                let path = find_config_file(&self.start_dir, &self.workspace_root)?;
                match read_manifest(&path) {
                    Ok(actions) => {
                        log::debug!("Loaded {} lens entries from {}", actions.len_options.len(), path.display());
                        Some(actions)
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {e}", path.display());
                        None
                    }
                }
            })
            .await
    }
}

fn read_manifest(path: &Path) -> Result<ExternalActions> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
