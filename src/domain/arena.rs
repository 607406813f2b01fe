use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::event::EventKind;

/// Which child slot of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// One room of the maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeNode {
    /// Event tag of this room
    pub event: EventKind,
    /// Set by play only; generation marks the entrance visited
    pub visited: bool,
    /// Index of left child in the arena
    pub left: Option<Index>,
    /// Index of right child in the arena
    pub right: Option<Index>,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
}

impl MazeNode {
    fn new(event: EventKind, parent: Option<Index>) -> Self {
        Self {
            event,
            visited: false,
            left: None,
            right: None,
            parent,
        }
    }

    pub fn child(&self, side: Side) -> Option<Index> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Arena-based binary maze.
///
/// The arena owns every room; child and parent links are plain indices, so
/// dropping the tree releases all nodes at once.
#[derive(Debug, Clone, Default)]
pub struct MazeTree {
    /// Arena storage for all rooms
    arena: Arena<MazeNode>,
    /// Index of the entrance room, None for empty trees
    root: Option<Index>,
    /// Player position, left unset by generation
    current: Option<Index>,
}

impl MazeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the root room; fails if a root already exists.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_root(&mut self, event: EventKind) -> DomainResult<Index> {
        if let Some(root) = self.root {
            return Err(DomainError::RootExists(root));
        }
        let idx = self.arena.insert(MazeNode::new(event, None));
        self.root = Some(idx);
        Ok(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_child(
        &mut self,
        parent: Index,
        side: Side,
        event: EventKind,
    ) -> DomainResult<Index> {
        let parent_node = self
            .arena
            .get(parent)
            .ok_or(DomainError::NodeNotFound(parent))?;
        if parent_node.child(side).is_some() {
            return Err(DomainError::SlotOccupied { parent, side });
        }

        let idx = self.arena.insert(MazeNode::new(event, Some(parent)));
        if let Some(parent_node) = self.arena.get_mut(parent) {
            match side {
                Side::Left => parent_node.left = Some(idx),
                Side::Right => parent_node.right = Some(idx),
            }
        }
        Ok(idx)
    }

    pub fn node(&self, idx: Index) -> Option<&MazeNode> {
        self.arena.get(idx)
    }

    pub fn node_mut(&mut self, idx: Index) -> Option<&mut MazeNode> {
        self.arena.get_mut(idx)
    }

    /// Node lookup that treats a stale index as an error.
    pub fn try_node(&self, idx: Index) -> DomainResult<&MazeNode> {
        self.arena.get(idx).ok_or(DomainError::NodeNotFound(idx))
    }

    pub fn set_event(&mut self, idx: Index, event: EventKind) -> DomainResult<()> {
        let node = self
            .arena
            .get_mut(idx)
            .ok_or(DomainError::NodeNotFound(idx))?;
        node.event = event;
        Ok(())
    }

    pub fn event(&self, idx: Index) -> Option<EventKind> {
        self.arena.get(idx).map(|node| node.event)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn current(&self) -> Option<Index> {
        self.current
    }

    pub fn set_current(&mut self, idx: Index) -> DomainResult<()> {
        if !self.arena.contains(idx) {
            return Err(DomainError::NodeNotFound(idx));
        }
        self.current = Some(idx);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Number of ancestors of `idx` (root = 0).
    pub fn depth_of(&self, idx: Index) -> usize {
        let mut depth = 0;
        let mut cursor = self.node(idx).and_then(|node| node.parent);
        while let Some(parent) = cursor {
            depth += 1;
            cursor = self.node(parent).and_then(|node| node.parent);
        }
        depth
    }

    /// Number of levels in the tree, 0 when empty.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.node(idx) {
                stack.extend(node.left.map(|c| (c, depth + 1)));
                stack.extend(node.right.map(|c| (c, depth + 1)));
            }
        }
        max_depth
    }

    /// Pre-order traversal: self, left subtree, right subtree.
    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }

    pub fn leaves(&self) -> Vec<Index> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn count_event(&self, kind: EventKind) -> usize {
        self.iter().filter(|(_, node)| node.event == kind).count()
    }

    pub fn find_event(&self, kind: EventKind) -> Option<Index> {
        self.iter()
            .find(|(_, node)| node.event == kind)
            .map(|(idx, _)| idx)
    }

    pub fn reset_visited(&mut self) {
        for (_, node) in self.arena.iter_mut() {
            node.visited = false;
        }
    }

    pub fn count_unexplored(&self) -> usize {
        self.iter().filter(|(_, node)| !node.visited).count()
    }
}

pub struct PreOrderIterator<'a> {
    tree: &'a MazeTree,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a MazeTree) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a MazeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.node(current_idx) {
                // Right first so the left subtree is popped next
                self.stack.extend(node.right);
                self.stack.extend(node.left);
                return Some((current_idx, node));
            }
        }
        None
    }
}
