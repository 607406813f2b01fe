//! Domain-level errors (no external dependencies)

use generational_arena::Index;
use thiserror::Error;

use crate::domain::arena::Side;

/// Domain errors represent violations of the maze structure contract.
/// These are independent of terminal and configuration concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid maze size: {0} (at least one room is required)")]
    InvalidSize(usize),

    #[error("node not found in maze: {0:?}")]
    NodeNotFound(Index),

    #[error("{side} child slot of {parent:?} is already occupied")]
    SlotOccupied { parent: Index, side: Side },

    #[error("maze already has a root: {0:?}")]
    RootExists(Index),

    #[error("maze has no root")]
    EmptyTree,
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
