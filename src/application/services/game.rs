//! Game session: player position, room effects and moves on a generated maze.

use std::fmt;

use generational_arena::Index;
use tracing::debug;

use crate::domain::{DomainError, DomainResult, EventKind, MazeTree, RandomSource, Side};

/// Direction requested by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Left,
    Right,
    Up,
}

/// Why a move did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    NoParent,
    NoChild(Side),
    DoorLocked,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::NoParent => write!(f, "No parent."),
            BlockReason::NoChild(side) => write!(f, "No {} room.", side),
            BlockReason::DoorLocked => write!(f, "The door is locked, you cannot pass."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Won,
    Blocked(BlockReason),
}

/// Something that happened when the player entered a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomEffect {
    MemoryLost,
    FellToStart,
    KeyFound,
    DoorReached { unlocked: bool },
    Fog,
    Disoriented,
}

impl fmt::Display for RoomEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomEffect::MemoryLost => {
                write!(f, "You lost your memory, you no longer know where you are.")
            }
            RoomEffect::FellToStart => write!(f, "You fall out of the tree! Back to the start."),
            RoomEffect::KeyFound => write!(f, "You found a key! But where is the door?"),
            RoomEffect::DoorReached { unlocked: true } => write!(
                f,
                "You reach a locked door, and luckily you already have the key!"
            ),
            RoomEffect::DoorReached { unlocked: false } => write!(
                f,
                "You reach a locked door. Where is the key to go further?"
            ),
            RoomEffect::Fog => write!(f, "There is a lot of fog here ..."),
            RoomEffect::Disoriented => {
                write!(f, "You are disoriented, your next move will be random.")
            }
        }
    }
}

/// One play-through of a maze. Owns the tree and only touches `visited`
/// flags and the current position, never structure or event tags.
#[derive(Debug)]
pub struct GameSession {
    tree: MazeTree,
    current: Index,
    has_key: bool,
    random_move_armed: bool,
    won: bool,
    moves: usize,
}

impl GameSession {
    /// Start at the entrance.
    pub fn new(mut tree: MazeTree) -> DomainResult<Self> {
        let root = tree.root().ok_or(DomainError::EmptyTree)?;
        tree.set_current(root)?;
        Ok(Self {
            tree,
            current: root,
            has_key: false,
            random_move_armed: false,
            won: false,
            moves: 0,
        })
    }

    pub fn tree(&self) -> &MazeTree {
        &self.tree
    }

    pub fn into_tree(self) -> MazeTree {
        self.tree
    }

    pub fn current(&self) -> Index {
        self.current
    }

    pub fn current_event(&self) -> DomainResult<EventKind> {
        Ok(self.tree.try_node(self.current)?.event)
    }

    pub fn has_key(&self) -> bool {
        self.has_key
    }

    pub fn random_move_armed(&self) -> bool {
        self.random_move_armed
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Standing on the exit counts as won even before any move (single-room maze).
    pub fn at_exit(&self) -> bool {
        self.tree.event(self.current) == Some(EventKind::Exit)
    }

    /// Won, or standing on the exit.
    pub fn is_over(&self) -> bool {
        self.won || self.at_exit()
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn unexplored(&self) -> usize {
        self.tree.count_unexplored()
    }

    /// Apply the effects of the room the player stands in.
    ///
    /// Memory loss and the fall trap act on the entered room; the remaining
    /// checks act on wherever the player stands afterwards. The room is then
    /// marked visited unless it is fog.
    pub fn enter_room(&mut self) -> DomainResult<Vec<RoomEffect>> {
        let mut effects = Vec::new();
        self.random_move_armed = false;

        let entered = self.tree.try_node(self.current)?.clone();
        if entered.event == EventKind::MemoryLoss && !entered.visited {
            self.tree.reset_visited();
            effects.push(RoomEffect::MemoryLost);
        }
        if entered.event == EventKind::FallTrap && !entered.visited {
            self.mark_visited(self.current)?;
            let root = self.tree.root().ok_or(DomainError::EmptyTree)?;
            self.relocate(root)?;
            effects.push(RoomEffect::FellToStart);
        }

        let here = self.tree.try_node(self.current)?.clone();
        match here.event {
            EventKind::Key if !here.visited => {
                self.has_key = true;
                effects.push(RoomEffect::KeyFound);
            }
            EventKind::Door if !here.visited => {
                effects.push(RoomEffect::DoorReached {
                    unlocked: self.has_key,
                });
            }
            EventKind::Fog => effects.push(RoomEffect::Fog),
            EventKind::RandomMove if !here.visited => {
                self.random_move_armed = true;
                effects.push(RoomEffect::Disoriented);
            }
            _ => {}
        }

        if here.event != EventKind::Fog {
            self.mark_visited(self.current)?;
        }
        debug!("entered {:?}: {:?}", here.event, effects);
        Ok(effects)
    }

    /// Move as requested. Leaving a door room downward needs the key.
    pub fn step(&mut self, mv: Move) -> DomainResult<MoveOutcome> {
        let node = self.tree.try_node(self.current)?;
        let target = match mv {
            Move::Up => match node.parent {
                Some(parent) => parent,
                None => return Ok(MoveOutcome::Blocked(BlockReason::NoParent)),
            },
            Move::Left | Move::Right => {
                let side = if mv == Move::Left { Side::Left } else { Side::Right };
                if node.event == EventKind::Door && !self.has_key {
                    return Ok(MoveOutcome::Blocked(BlockReason::DoorLocked));
                }
                match node.child(side) {
                    Some(child) => child,
                    None => return Ok(MoveOutcome::Blocked(BlockReason::NoChild(side))),
                }
            }
        };
        self.advance(target)
    }

    /// Random move among parent, left and right, in that order.
    /// A random move ignores a locked door.
    pub fn random_step<R: RandomSource>(&mut self, rng: &mut R) -> DomainResult<MoveOutcome> {
        self.random_move_armed = false;
        let node = self.tree.try_node(self.current)?;
        let options: Vec<Index> = [node.parent, node.left, node.right]
            .into_iter()
            .flatten()
            .collect();
        match rng.choose(&options) {
            Some(&target) => self.advance(target),
            None => Ok(MoveOutcome::Blocked(BlockReason::NoParent)),
        }
    }

    fn advance(&mut self, target: Index) -> DomainResult<MoveOutcome> {
        self.relocate(target)?;
        self.moves += 1;
        if self.at_exit() {
            self.mark_visited(target)?;
            self.won = true;
            return Ok(MoveOutcome::Won);
        }
        Ok(MoveOutcome::Moved)
    }

    fn relocate(&mut self, target: Index) -> DomainResult<()> {
        self.tree.set_current(target)?;
        self.current = target;
        Ok(())
    }

    fn mark_visited(&mut self, idx: Index) -> DomainResult<()> {
        let node = self
            .tree
            .node_mut(idx)
            .ok_or(DomainError::NodeNotFound(idx))?;
        node.visited = true;
        Ok(())
    }
}
