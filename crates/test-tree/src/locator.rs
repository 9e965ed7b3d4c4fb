use crate::escape::escape_regex;
use crate::types::{NodeId, TestForest};

/// Resolve a 1-based source line to the full qualified name of the nearest
/// enclosing declaration.
///
/// The deepest node whose inclusive range contains `line` wins; among
/// siblings the first containing node in source order is taken. Assertion
/// nodes are traversed but never become the resolved match, so a line inside
/// an `expect` still resolves to its enclosing test. `None` means the line is
/// outside every declaration and callers should run the whole file.
#[must_use]
pub fn locate(line: usize, forest: &TestForest) -> Option<String> {
    let id = find_deepest(line, forest, forest.roots())?;
    Some(full_test_name(forest, id))
}

/// Build the escaped, space-joined name chain from the outermost ancestor
/// down to `id`.
#[must_use]
pub fn full_test_name(forest: &TestForest, id: NodeId) -> String {
    forest
        .name_chain(id)
        .into_iter()
        .map(escape_regex)
        .collect::<Vec<_>>()
        .join(" ")
}

fn find_deepest(line: usize, forest: &TestForest, ids: &[NodeId]) -> Option<NodeId> {
    for &id in ids {
        let node = forest.get(id)?;
        // Siblings are source-ordered, so nothing after this can contain the line.
        if node.start.line > line {
            return None;
        }
        if !node.contains_line(line) {
            continue;
        }
        if let Some(deeper) = find_deepest(line, forest, &node.children) {
            return Some(deeper);
        }
        if node.kind.is_runnable() {
            return Some(id);
        }
        // An assertion match falls back to the enclosing declaration.
        return None;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Position, TestKind, TestNode};
    use pretty_assertions::assert_eq;

    fn node(kind: TestKind, name: &str, start: usize, end: usize) -> TestNode {
        TestNode::new(kind, name, Position::new(start, 0), Position::new(end, 0))
    }

    /// suite "A" (1..10)
    ///   test "B" (2..4)
    ///     assertion (3..3)
    ///   test "C" (5..8)
    fn sample_forest() -> TestForest {
        let mut forest = TestForest::new();
        let a = forest.push_root(node(TestKind::Suite, "A", 1, 10));
        let b = forest.push_child(a, node(TestKind::Test, "B", 2, 4)).unwrap();
        forest
            .push_child(b, node(TestKind::Assertion, "expect", 3, 3))
            .unwrap();
        forest.push_child(a, node(TestKind::Test, "C", 5, 8)).unwrap();
        forest
    }

    #[test]
    fn test_deepest_node_wins() {
        let forest = sample_forest();
        assert_eq!(locate(2, &forest).as_deref(), Some("A B"));
        assert_eq!(locate(6, &forest).as_deref(), Some("A C"));
    }

    #[test]
    fn test_line_in_suite_only() {
        let forest = sample_forest();
        // Line 9 is inside the suite but outside both tests.
        assert_eq!(locate(9, &forest).as_deref(), Some("A"));
    }

    #[test]
    fn test_line_outside_every_range() {
        let forest = sample_forest();
        assert_eq!(locate(11, &forest), None);
        assert_eq!(locate(42, &forest), None);
    }

    #[test]
    fn test_assertion_resolves_to_enclosing_test() {
        let forest = sample_forest();
        assert_eq!(locate(3, &forest).as_deref(), Some("A B"));
    }

    #[test]
    fn test_names_are_regex_escaped() {
        let mut forest = TestForest::new();
        let a = forest.push_root(node(TestKind::Suite, "math (unit)", 1, 5));
        forest
            .push_child(a, node(TestKind::Test, "adds 1 + 1", 2, 3))
            .unwrap();
        assert_eq!(
            locate(2, &forest).as_deref(),
            Some("math \\(unit\\) adds 1 \\+ 1")
        );
    }

    #[test]
    fn child_on_parent_declaration_line_wins() {
        // Single-line `describe("A", () => { test("B", ...) })`: both ranges
        // start on line 1; the deepest containing node is the match.
        let mut forest = TestForest::new();
        let a = forest.push_root(node(TestKind::Suite, "A", 1, 1));
        forest.push_child(a, node(TestKind::Test, "B", 1, 1)).unwrap();
        assert_eq!(locate(1, &forest).as_deref(), Some("A B"));
    }

    #[test]
    fn test_later_sibling_never_candidate() {
        let mut forest = TestForest::new();
        forest.push_root(node(TestKind::Test, "first", 1, 3));
        forest.push_root(node(TestKind::Test, "second", 5, 8));
        assert_eq!(locate(4, &forest), None);
    }
}
