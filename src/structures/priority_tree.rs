//! Priority tree
//!
//! Append-only binary search tree keyed by priority. It indexes every task
//! that was ever activated and is never pruned, so it can still show tasks
//! that have since been deleted from the active list.
//!
//! Insertion sends strictly smaller priorities left and everything else right,
//! so equal priorities pile up along the right spine. The tree is not
//! rebalanced.

use std::collections::VecDeque;

use crate::models::Task;

type Link = Option<Box<TreeNode>>;

struct TreeNode {
    task: Task,
    left: Link,
    right: Link,
}

impl TreeNode {
    fn leaf(task: Task) -> Self {
        Self {
            task,
            left: None,
            right: None,
        }
    }
}

#[derive(Default)]
pub struct PriorityTree {
    root: Link,
    len: usize,
}

impl PriorityTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a task as a new leaf
    pub fn insert(&mut self, task: Task) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if task.priority() < node.task.priority() {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Box::new(TreeNode::leaf(task)));
        self.len += 1;
    }

    /// Breadth-first traversal grouped by depth, root level first, left
    /// before right within a level
    pub fn levels(&self) -> Vec<Vec<&Task>> {
        let mut levels = Vec::new();
        let mut queue: VecDeque<&TreeNode> = self.root.as_deref().into_iter().collect();

        while !queue.is_empty() {
            let width = queue.len();
            let mut level = Vec::with_capacity(width);
            for _ in 0..width {
                let Some(node) = queue.pop_front() else {
                    break;
                };
                level.push(&node.task);
                queue.extend(node.left.as_deref());
                queue.extend(node.right.as_deref());
            }
            levels.push(level);
        }

        levels
    }

    /// Number of levels from the root down to the deepest leaf
    pub fn depth(&self) -> usize {
        self.levels().len()
    }

    /// Number of nodes ever inserted
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

impl Drop for PriorityTree {
    fn drop(&mut self) {
        let mut pending: Vec<Box<TreeNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use pretty_assertions::assert_eq;

    fn render(tree: &PriorityTree) -> Vec<Vec<String>> {
        tree.levels()
            .into_iter()
            .map(|level| {
                level
                    .into_iter()
                    .map(|task| format!("{}(P:{})", task.name(), task.priority()))
                    .collect()
            })
            .collect()
    }

    fn insert_all(tree: &mut PriorityTree, tasks: &[(&str, Priority)]) {
        for (name, priority) in tasks {
            tree.insert(Task::new(name, *priority));
        }
    }

    #[test]
    fn test_empty_tree() {
        let tree = PriorityTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.levels().is_empty());
    }

    #[test]
    fn test_smaller_goes_left_equal_goes_right() {
        let mut tree = PriorityTree::new();
        insert_all(
            &mut tree,
            &[
                ("root", Priority::Medium),
                ("high", Priority::High),
                ("low", Priority::Low),
                ("medium2", Priority::Medium),
            ],
        );

        // medium2 goes right of root (equal), then left of low (smaller)
        assert_eq!(
            render(&tree),
            vec![
                vec!["root(P:2)".to_string()],
                vec!["high(P:1)".to_string(), "low(P:3)".to_string()],
                vec!["medium2(P:2)".to_string()],
            ]
        );
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_duplicates_form_right_chain() {
        let mut tree = PriorityTree::new();
        insert_all(
            &mut tree,
            &[
                ("a", Priority::High),
                ("b", Priority::High),
                ("c", Priority::High),
            ],
        );

        assert_eq!(
            render(&tree),
            vec![
                vec!["a(P:1)".to_string()],
                vec!["b(P:1)".to_string()],
                vec!["c(P:1)".to_string()],
            ]
        );
    }

    #[test]
    fn test_wide_level_has_no_capacity_ceiling() {
        let mut tree = PriorityTree::new();
        for i in 0..500 {
            let priority = match i % 3 {
                0 => Priority::High,
                1 => Priority::Medium,
                _ => Priority::Low,
            };
            tree.insert(Task::new(&format!("t{i}"), priority));
        }

        let visited: usize = tree.levels().iter().map(Vec::len).sum();
        assert_eq!(visited, 500);
        assert_eq!(tree.len(), 500);
    }

    #[test]
    fn test_levels_visit_in_depth_order() {
        let mut tree = PriorityTree::new();
        insert_all(
            &mut tree,
            &[
                ("m", Priority::Medium),
                ("h", Priority::High),
                ("l", Priority::Low),
                ("h2", Priority::High),
                ("l2", Priority::Low),
                ("m2", Priority::Medium),
            ],
        );

        // h2 right of h, m2 left of l, l2 right of l
        assert_eq!(
            render(&tree),
            vec![
                vec!["m(P:2)".to_string()],
                vec!["h(P:1)".to_string(), "l(P:3)".to_string()],
                vec![
                    "h2(P:1)".to_string(),
                    "m2(P:2)".to_string(),
                    "l2(P:3)".to_string()
                ],
            ]
        );
    }

    #[test]
    fn test_degenerate_chain_drops_without_overflow() {
        let mut tree = PriorityTree::new();
        for i in 0..2_000 {
            tree.insert(Task::new(&i.to_string(), Priority::Low));
        }
        assert_eq!(tree.len(), 2_000);
        assert_eq!(tree.depth(), 2_000);
        drop(tree);
    }
}
