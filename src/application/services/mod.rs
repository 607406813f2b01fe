//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (Console) but are themselves
//! concrete structs, not traits.

mod game;
mod generation;
mod play;

pub use game::{BlockReason, GameSession, Move, MoveOutcome, RoomEffect};
pub use generation::{GeneratedMaze, GenerationMode, MazeService};
pub use play::{GameService, GameSummary, PlayerCommand};
