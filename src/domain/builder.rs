//! Tree builder: random growth of the maze and exit selection.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{MazeTree, Side};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::event::EventKind;
use crate::domain::rng::RandomSource;

/// Grows a maze of a fixed room count.
#[derive(Debug, Default)]
pub struct TreeBuilder;

impl TreeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a maze with exactly `target_size` rooms.
    ///
    /// The root is the visited entrance. Every further room is inserted by a
    /// coin-flip descent from the root into the first empty slot it meets.
    /// Finally a left-leaning random descent tags the leaf it ends on as exit.
    ///
    /// With `target_size == 1` the only room is both start and end of the exit
    /// descent and ends up tagged `Exit`.
    #[instrument(level = "debug", skip(self, rng))]
    pub fn build<R: RandomSource>(&self, target_size: usize, rng: &mut R) -> DomainResult<MazeTree> {
        if target_size == 0 {
            return Err(DomainError::InvalidSize(target_size));
        }

        let mut tree = MazeTree::new();
        let root = tree.insert_root(EventKind::Entrance)?;
        if let Some(node) = tree.node_mut(root) {
            node.visited = true;
        }

        for _ in 1..target_size {
            self.insert_random(&mut tree, root, rng)?;
        }

        let exit = self.find_exit_leaf(&tree, root, rng)?;
        tree.set_event(exit, EventKind::Exit)?;
        debug!(
            "built maze: rooms={} height={} exit={:?}",
            tree.len(),
            tree.height(),
            exit
        );
        Ok(tree)
    }

    fn insert_random<R: RandomSource>(
        &self,
        tree: &mut MazeTree,
        root: Index,
        rng: &mut R,
    ) -> DomainResult<Index> {
        let mut current = root;
        loop {
            let side = if rng.coin() { Side::Left } else { Side::Right };
            match tree.try_node(current)?.child(side) {
                Some(child) => current = child,
                None => return tree.insert_child(current, side, EventKind::Standard),
            }
        }
    }

    /// Walk down preferring left; a coin is only flipped when both children exist.
    fn find_exit_leaf<R: RandomSource>(
        &self,
        tree: &MazeTree,
        root: Index,
        rng: &mut R,
    ) -> DomainResult<Index> {
        let mut current = root;
        loop {
            let node = tree.try_node(current)?;
            current = match (node.left, node.right) {
                (None, None) => return Ok(current),
                (Some(left), None) => left,
                (None, Some(right)) => right,
                (Some(left), Some(right)) => {
                    if rng.coin() {
                        left
                    } else {
                        right
                    }
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rng::GameRng;
    use crate::util::testing::ScriptedRng;

    #[test]
    fn test_zero_size_is_rejected() {
        let mut rng = GameRng::new(1);
        let err = TreeBuilder::new().build(0, &mut rng).unwrap_err();
        assert_eq!(err, DomainError::InvalidSize(0));
    }

    #[test]
    fn test_single_room_becomes_exit() {
        let mut rng = ScriptedRng::new(vec![]);
        let tree = TreeBuilder::new().build(1, &mut rng).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.event(root), Some(EventKind::Exit));
        assert!(tree.node(root).unwrap().visited);
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_scripted_draws_shape_the_tree() {
        // insert #1: 0 -> left of root
        // insert #2: 1 -> right of root
        // insert #3: 0, 1 -> left, then right of left child
        // exit: 1 -> root has both children, take right (a leaf)
        let mut rng = ScriptedRng::new(vec![0, 1, 0, 1, 1]);
        let tree = TreeBuilder::new().build(4, &mut rng).unwrap();

        let root = tree.root().unwrap();
        let root_node = tree.node(root).unwrap();
        let left = root_node.left.unwrap();
        let right = root_node.right.unwrap();
        let left_right = tree.node(left).unwrap().right.unwrap();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.event(root), Some(EventKind::Entrance));
        assert_eq!(tree.event(left), Some(EventKind::Standard));
        assert_eq!(tree.event(left_right), Some(EventKind::Standard));
        assert_eq!(tree.event(right), Some(EventKind::Exit));
        assert_eq!(rng.consumed(), 5);
    }

    #[test]
    fn test_exit_descent_follows_only_child_without_drawing() {
        // every insertion goes right: a chain root -> r1 -> r2
        let mut rng = ScriptedRng::new(vec![1, 1, 1]);
        let tree = TreeBuilder::new().build(3, &mut rng).unwrap();
        let leaf = tree.leaves()[0];
        assert_eq!(tree.event(leaf), Some(EventKind::Exit));
        assert_eq!(tree.depth_of(leaf), 2);
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn test_generation_leaves_current_unset() {
        let mut rng = GameRng::new(11);
        let tree = TreeBuilder::new().build(25, &mut rng).unwrap();
        assert_eq!(tree.current(), None);
        assert_eq!(tree.len(), 25);
    }
}
