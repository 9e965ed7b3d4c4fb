use serde::{Deserialize, Serialize};
use testlens_tree::{NodeId, Position};

/// Host action identifier of a fixed descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixedCommand {
    Run,
    Debug,
}

impl FixedCommand {
    /// Identifier exposed to the editor host
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Debug => "debug",
        }
    }
}

/// What an action does when invoked.
///
/// External actions never carry executable code, only an identifier that the
/// dispatcher resolves against its registered handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ActionKind {
    /// Fixed run/debug action carrying the escaped full test name
    Fixed {
        command: FixedCommand,
        test_name: String,
    },
    /// Externally contributed action, dispatched through the handler registry
    External {
        /// Entry identifier from the action manifest
        name: String,
        /// Host action identifier to invoke
        command: String,
        /// Optional registered runner id
        handler: Option<String>,
    },
}

/// One actionable command descriptor attached to a declaration's range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LensAction {
    /// Display title
    pub title: String,

    /// Effect when invoked
    pub action: ActionKind,

    /// Start of the declaration's range
    pub start: Position,

    /// End of the declaration's range (inclusive)
    pub end: Position,
}

/// The descriptors associated with one declaration node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionGroup {
    /// Arena index of the declaration
    pub node: NodeId,

    /// Fixed descriptors first, then external ones, stable order
    pub actions: Vec<LensAction>,
}
