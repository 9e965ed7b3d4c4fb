use crate::error::{Result, TreeError};
use serde::{Deserialize, Serialize};

/// Index of a node inside a [`TestForest`] arena
pub type NodeId = usize;

/// A source position (1-based line, 0-based column)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,

    /// Column number (0-indexed)
    pub column: usize,
}

impl Position {
    /// Create a new position
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Kind of declaration found in a test file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestKind {
    /// A `describe` block grouping tests
    Suite,
    /// A single `test`/`it` declaration
    Test,
    /// An `expect` assertion inside a test
    Assertion,
    /// Unrecognized declaration, treated as an opaque container
    Other,
}

impl TestKind {
    /// Check if this kind can be resolved as a runnable match
    #[must_use]
    pub const fn is_runnable(self) -> bool {
        !matches!(self, Self::Assertion)
    }

    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Suite => "suite",
            Self::Test => "test",
            Self::Assertion => "assertion",
            Self::Other => "other",
        }
    }
}

/// A single declaration in a test file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestNode {
    /// Declaration kind
    pub kind: TestKind,

    /// Display name (first string argument of the declaration)
    pub name: String,

    /// Start of the declaration's range
    pub start: Position,

    /// End of the declaration's range (inclusive)
    pub end: Position,

    /// Children in source order
    pub children: Vec<NodeId>,

    /// Enclosing declaration, `None` for roots
    pub parent: Option<NodeId>,
}

impl TestNode {
    /// Create a new node with no relations yet
    pub fn new(kind: TestKind, name: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            kind,
            name: name.into(),
            start,
            end,
            children: Vec::new(),
            parent: None,
        }
    }

    /// Check if the node's inclusive line range contains a line
    #[must_use]
    pub const fn contains_line(&self, line: usize) -> bool {
        line >= self.start.line && line <= self.end.line
    }
}

/// Index-addressed arena holding an ordered forest of test declarations.
///
/// Parent links are plain indices, so the ancestor chain can be walked for
/// name resolution without owning back-references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestForest {
    nodes: Vec<TestNode>,
    roots: Vec<NodeId>,
}

impl TestForest {
    /// Create an empty forest
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level declaration
    pub fn push_root(&mut self, node: TestNode) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        self.roots.push(id);
        id
    }

    /// Append a declaration nested under `parent`.
    ///
    /// The child's line range must be contained in the parent's.
    pub fn push_child(&mut self, parent: NodeId, mut node: TestNode) -> Result<NodeId> {
        let Some(parent_node) = self.nodes.get(parent) else {
            return Err(TreeError::NodeNotFound(parent));
        };
        if node.start.line < parent_node.start.line || node.end.line > parent_node.end.line {
            return Err(TreeError::InvalidRange {
                child_start: node.start.line,
                child_end: node.end.line,
                parent_start: parent_node.start.line,
                parent_end: parent_node.end.line,
            });
        }
        node.parent = Some(parent);
        let id = self.nodes.len();
        self.nodes.push(node);
        self.nodes[parent].children.push(id);
        Ok(id)
    }

    /// Get a node by index
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&TestNode> {
        self.nodes.get(id)
    }

    /// Top-level declarations in source order
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Total number of declarations
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the forest holds no declarations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Raw display names from the outermost ancestor down to `id`
    #[must_use]
    pub fn name_chain(&self, id: NodeId) -> Vec<&str> {
        let mut chain = Vec::new();
        let mut current = self.get(id);
        while let Some(node) = current {
            chain.push(node.name.as_str());
            current = node.parent.and_then(|p| self.get(p));
        }
        chain.reverse();
        chain
    }

    /// Iterate all nodes in document order (depth-first over roots)
    pub fn iter_document_order(&self) -> impl Iterator<Item = (NodeId, &TestNode)> + '_ {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            let node = &self.nodes[id];
            stack.extend(node.children.iter().rev());
            Some((id, node))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(kind: TestKind, name: &str, start: usize, end: usize) -> TestNode {
        TestNode::new(kind, name, Position::new(start, 0), Position::new(end, 0))
    }

    #[test]
    fn test_contains_line_inclusive() {
        let n = node(TestKind::Test, "t", 3, 7);
        assert!(n.contains_line(3));
        assert!(n.contains_line(5));
        assert!(n.contains_line(7));
        assert!(!n.contains_line(2));
        assert!(!n.contains_line(8));
    }

    #[test]
    fn test_push_child_links_parent() {
        let mut forest = TestForest::new();
        let root = forest.push_root(node(TestKind::Suite, "A", 1, 10));
        let child = forest.push_child(root, node(TestKind::Test, "B", 2, 4)).unwrap();

        assert_eq!(forest.get(child).unwrap().parent, Some(root));
        assert_eq!(forest.get(root).unwrap().children, vec![child]);
    }

    #[test]
    fn test_push_child_missing_parent() {
        let mut forest = TestForest::new();
        let result = forest.push_child(42, node(TestKind::Test, "B", 2, 4));
        assert!(result.is_err());
    }

    #[test]
    fn test_push_child_outside_parent_range() {
        let mut forest = TestForest::new();
        let root = forest.push_root(node(TestKind::Suite, "A", 2, 5));
        let result = forest.push_child(root, node(TestKind::Test, "B", 4, 9));
        assert!(matches!(result, Err(TreeError::InvalidRange { .. })));
    }

    #[test]
    fn test_name_chain_root_to_node() {
        let mut forest = TestForest::new();
        let root = forest.push_root(node(TestKind::Suite, "outer", 1, 20));
        let mid = forest.push_child(root, node(TestKind::Suite, "inner", 2, 10)).unwrap();
        let leaf = forest.push_child(mid, node(TestKind::Test, "case", 3, 5)).unwrap();

        assert_eq!(forest.name_chain(leaf), vec!["outer", "inner", "case"]);
        assert_eq!(forest.name_chain(root), vec!["outer"]);
    }

    #[test]
    fn test_document_order_iteration() {
        let mut forest = TestForest::new();
        let a = forest.push_root(node(TestKind::Suite, "A", 1, 10));
        forest.push_child(a, node(TestKind::Test, "A1", 2, 3)).unwrap();
        forest.push_child(a, node(TestKind::Test, "A2", 4, 5)).unwrap();
        forest.push_root(node(TestKind::Test, "B", 11, 12));

        let names: Vec<&str> = forest
            .iter_document_order()
            .map(|(_, n)| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "A1", "A2", "B"]);
    }
}
