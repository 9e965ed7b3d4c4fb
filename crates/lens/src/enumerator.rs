use crate::action::{ActionGroup, ActionKind, FixedCommand, LensAction};
use crate::loader::ExternalActionSource;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use testlens_tree::{full_test_name, NodeId, TestForest};

/// Enumerate one [`ActionGroup`] per non-assertion declaration.
///
/// Groups appear in document order, post-order with respect to children: a
/// node's own group follows its children's groups, sibling order unchanged.
/// Subtrees are computed concurrently but joined in source order, so the
/// output is deterministic regardless of which branch finishes first. A
/// failed branch or external lookup loses only its own extras, never a
/// sibling's group.
pub async fn enumerate(
    forest: Arc<TestForest>,
    source: Arc<ExternalActionSource>,
) -> Vec<ActionGroup> {
    let mut handles = Vec::new();
    for &root in forest.roots() {
        handles.push(tokio::spawn(subtree_groups(
            forest.clone(),
            root,
            source.clone(),
        )));
    }

    let mut groups = Vec::new();
    for handle in handles {
        match handle.await {
            Ok(subtree) => groups.extend(subtree),
            Err(e) => log::warn!("Lens enumeration task failed: {e}"),
        }
    }
    groups
}

fn subtree_groups(
    forest: Arc<TestForest>,
    id: NodeId,
    source: Arc<ExternalActionSource>,
) -> Pin<Box<dyn Future<Output = Vec<ActionGroup>> + Send>> {
    Box::pin(async move {
        let Some(node) = forest.get(id).cloned() else {
            return Vec::new();
        };

        let mut handles = Vec::new();
        for &child in &node.children {
            handles.push(tokio::spawn(subtree_groups(
                forest.clone(),
                child,
                source.clone(),
            )));
        }

        let mut groups = Vec::new();
        for handle in handles {
            match handle.await {
                Ok(subtree) => groups.extend(subtree),
                Err(e) => log::warn!("Lens enumeration task failed: {e}"),
            }
        }

        if node.kind.is_runnable() {
            let test_name = full_test_name(&forest, id);
            let mut actions = vec![
                LensAction {
                    title: "Run".to_string(),
                    action: ActionKind::Fixed {
                        command: FixedCommand::Run,
                        test_name: test_name.clone(),
                    },
                    start: node.start,
                    end: node.end,
                },
                LensAction {
                    title: "Debug".to_string(),
                    action: ActionKind::Fixed {
                        command: FixedCommand::Debug,
                        test_name,
                    },
                    start: node.start,
                    end: node.end,
                },
            ];

            for option in source.entries_for(node.kind).await {
                actions.push(LensAction {
                    title: option.title().to_string(),
                    action: ActionKind::External {
                        name: option.name.clone(),
                        command: option.command().to_string(),
                        handler: option.runner.clone(),
                    },
                    start: node.start,
                    end: node.end,
                });
            }

            groups.push(ActionGroup { node: id, actions });
        }

        groups
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use testlens_tree::{Position, TestKind, TestNode};

    fn node(kind: TestKind, name: &str, start: usize, end: usize) -> TestNode {
        TestNode::new(kind, name, Position::new(start, 0), Position::new(end, 0))
    }

    /// suite "A" (1..10)
    ///   test "B" (2..4) with a nested assertion (3..3)
    ///   test "C" (5..8)
    fn sample_forest() -> Arc<TestForest> {
        let mut forest = TestForest::new();
        let a = forest.push_root(node(TestKind::Suite, "A", 1, 10));
        let b = forest.push_child(a, node(TestKind::Test, "B", 2, 4)).unwrap();
        forest
            .push_child(b, node(TestKind::Assertion, "", 3, 3))
            .unwrap();
        forest.push_child(a, node(TestKind::Test, "C", 5, 8)).unwrap();
        Arc::new(forest)
    }

    #[tokio::test]
    async fn test_fixed_descriptor_counts() {
        let groups = enumerate(sample_forest(), Arc::new(ExternalActionSource::disabled())).await;

        // Suite + 2 tests; the assertion contributes no group.
        assert_eq!(groups.len(), 3);
        let total_actions: usize = groups.iter().map(|g| g.actions.len()).sum();
        assert_eq!(total_actions, 6);
        for group in &groups {
            assert_eq!(group.actions[0].title, "Run");
            assert_eq!(group.actions[1].title, "Debug");
        }
    }

    #[tokio::test]
    async fn test_post_order_with_stable_siblings() {
        let groups = enumerate(sample_forest(), Arc::new(ExternalActionSource::disabled())).await;

        let names: Vec<String> = groups
            .iter()
            .map(|g| match &g.actions[0].action {
                ActionKind::Fixed { test_name, .. } => test_name.clone(),
                ActionKind::External { .. } => unreachable!(),
            })
            .collect();
        assert_eq!(names, vec!["A B", "A C", "A"]);
    }

    #[tokio::test]
    async fn test_ranges_match_nodes() {
        let groups = enumerate(sample_forest(), Arc::new(ExternalActionSource::disabled())).await;

        let b_group = &groups[0];
        assert_eq!(b_group.actions[0].start, Position::new(2, 0));
        assert_eq!(b_group.actions[0].end, Position::new(4, 0));
    }

    #[tokio::test]
    async fn test_external_entries_appended() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join(crate::loader::CONFIG_FILE_NAME),
            r#"{
                "lenOptions": [
                    { "name": "coverage", "title": "Coverage", "runner": "coverage-report" }
                ]
            }"#,
        )
        .unwrap();

        let source = Arc::new(ExternalActionSource::new(temp.path(), temp.path()));
        let groups = enumerate(sample_forest(), source).await;

        for group in &groups {
            assert_eq!(group.actions.len(), 3);
            assert_eq!(
                group.actions[2].action,
                ActionKind::External {
                    name: "coverage".to_string(),
                    command: "run-with-options".to_string(),
                    handler: Some("coverage-report".to_string()),
                }
            );
        }
    }

    #[tokio::test]
    async fn test_loader_failure_keeps_fixed_actions() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join(crate::loader::CONFIG_FILE_NAME), "broken{").unwrap();

        let source = Arc::new(ExternalActionSource::new(temp.path(), temp.path()));
        let groups = enumerate(sample_forest(), source).await;

        assert_eq!(groups.len(), 3);
        for group in &groups {
            assert_eq!(group.actions.len(), 2);
        }
    }
}
