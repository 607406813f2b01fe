//! Read-only traversals feeding event placement.

use generational_arena::Index;
use tracing::instrument;

use crate::domain::arena::MazeTree;
use crate::domain::event::EventKind;

/// Every room that is neither entrance nor exit, in pre-order.
#[instrument(level = "trace", skip(tree))]
pub fn collect_all(tree: &MazeTree) -> Vec<Index> {
    tree.iter()
        .filter(|(_, node)| !matches!(node.event, EventKind::Entrance | EventKind::Exit))
        .map(|(idx, _)| idx)
        .collect()
}

/// Greedy path from the root: left if present, else right, until a leaf.
///
/// This is not the path to the exit; it is only the spine used to position
/// the key.
#[instrument(level = "trace", skip(tree))]
pub fn trace_path(tree: &MazeTree) -> Vec<Index> {
    let mut path = Vec::new();
    let mut cursor = tree.root();
    while let Some(idx) = cursor {
        let Some(node) = tree.node(idx) else { break };
        path.push(idx);
        cursor = node.left.or(node.right);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::arena::Side;

    //        E
    //       / \
    //      a   S
    //       \
    //        b
    //       / \
    //      c   d
    #[test]
    fn test_trace_path_prefers_left_then_falls_back_right() {
        let mut tree = MazeTree::new();
        let root = tree.insert_root(EventKind::Entrance).unwrap();
        let a = tree.insert_child(root, Side::Left, EventKind::Standard).unwrap();
        tree.insert_child(root, Side::Right, EventKind::Exit).unwrap();
        let b = tree.insert_child(a, Side::Right, EventKind::Standard).unwrap();
        let c = tree.insert_child(b, Side::Left, EventKind::Standard).unwrap();
        let d = tree.insert_child(b, Side::Right, EventKind::Standard).unwrap();

        assert_eq!(trace_path(&tree), vec![root, a, b, c]);
        assert_eq!(collect_all(&tree), vec![a, b, c, d]);
    }

    #[test]
    fn test_empty_tree_yields_nothing() {
        let tree = MazeTree::new();
        assert!(trace_path(&tree).is_empty());
        assert!(collect_all(&tree).is_empty());
    }

    #[test]
    fn test_traversals_are_restartable() {
        let mut tree = MazeTree::new();
        let root = tree.insert_root(EventKind::Entrance).unwrap();
        tree.insert_child(root, Side::Left, EventKind::Standard).unwrap();
        assert_eq!(collect_all(&tree), collect_all(&tree));
        assert_eq!(trace_path(&tree), trace_path(&tree));
    }
}
