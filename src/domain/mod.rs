//! Domain layer: maze structure and generation algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod event;
pub mod path;
pub mod placer;
pub mod rng;

pub use arena::{MazeNode, MazeTree, PreOrderIterator, Side};
pub use builder::TreeBuilder;
pub use error::{DomainError, DomainResult};
pub use event::{EventCounts, EventKind, EventTable, EventType};
pub use path::{collect_all, trace_path};
pub use placer::{EventPlacer, PlacementReport, PlacementWarning};
pub use rng::{GameRng, RandomSource};
