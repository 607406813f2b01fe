//! Maze generation service
//!
//! Runs the builder and, depending on the mode, the event placer.

use tracing::{debug, info};

use crate::application::ApplicationResult;
use crate::domain::{EventPlacer, EventTable, MazeTree, PlacementReport, RandomSource, TreeBuilder};

/// Whether the placer runs after the tree is grown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Entrance and exit only
    Bare,
    /// Key, door and hazards placed
    WithEvents,
}

/// A generated maze and what the placer reported.
#[derive(Debug, Clone)]
pub struct GeneratedMaze {
    pub tree: MazeTree,
    /// `None` when generated without events
    pub report: Option<PlacementReport>,
}

impl GeneratedMaze {
    pub fn warnings(&self) -> Vec<String> {
        self.report
            .iter()
            .flat_map(|report| report.warnings.iter().map(ToString::to_string))
            .collect()
    }
}

/// Service wrapping tree building and event placement.
pub struct MazeService {
    table: EventTable,
    builder: TreeBuilder,
}

impl Default for MazeService {
    fn default() -> Self {
        Self::new(EventTable::default())
    }
}

impl MazeService {
    pub fn new(table: EventTable) -> Self {
        Self {
            table,
            builder: TreeBuilder::new(),
        }
    }

    pub fn table(&self) -> &EventTable {
        &self.table
    }

    /// Build a maze of `size` rooms.
    pub fn generate<R: RandomSource>(
        &self,
        size: usize,
        mode: GenerationMode,
        rng: &mut R,
    ) -> ApplicationResult<GeneratedMaze> {
        debug!("generate: size={} mode={:?}", size, mode);
        let mut tree = self.builder.build(size, rng)?;
        let report = match mode {
            GenerationMode::Bare => None,
            GenerationMode::WithEvents => {
                Some(EventPlacer::new(&self.table).place_events(&mut tree, rng)?)
            }
        };
        info!("generated maze with {} rooms", tree.len());
        Ok(GeneratedMaze { tree, report })
    }
}
