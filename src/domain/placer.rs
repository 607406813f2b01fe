//! Event placement: key/door gating plus hazard scattering.
//!
//! Draw order for one call, with `p` = greedy path length and `n` = size of
//! the generic pool:
//! 1. key index, `rn2(p - 2)` (only when `p >= 3`)
//! 2. door candidate, `rn2(candidates)` (only when a key was placed and
//!    candidates exist)
//! 3. Fisher-Yates shuffle of the pool, `n - 1` draws
//! 4. one `rn2(choices)` per pooled room

use generational_arena::Index;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::domain::arena::MazeTree;
use crate::domain::error::DomainResult;
use crate::domain::event::{EventCounts, EventKind, EventTable};
use crate::domain::path::{collect_all, trace_path};
use crate::domain::rng::RandomSource;

/// Minimum greedy path length that can hold entrance, key and one more room.
const MIN_KEY_PATH_LEN: usize = 3;

/// Non-fatal placement outcomes reported back to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementWarning {
    #[error("key placed but no deeper room for the door; the key became a standard room")]
    KeyWithoutDoor,

    #[error("door placed without a key; the door can never be opened")]
    DoorWithoutKey,
}

/// What one placement pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementReport {
    /// Room holding the key, after any revert
    pub key: Option<Index>,
    pub door: Option<Index>,
    /// Path index the key was drawn at (the door depth threshold)
    pub key_path_index: Option<usize>,
    pub warnings: Vec<PlacementWarning>,
}

/// Assigns event tags on a freshly built maze.
pub struct EventPlacer<'a> {
    table: &'a EventTable,
}

impl<'a> EventPlacer<'a> {
    pub fn new(table: &'a EventTable) -> Self {
        Self { table }
    }

    #[instrument(level = "debug", skip_all, fields(rooms = tree.len()))]
    pub fn place_events<R: RandomSource>(
        &self,
        tree: &mut MazeTree,
        rng: &mut R,
    ) -> DomainResult<PlacementReport> {
        let mut counts = EventCounts::new();
        for kind in [EventKind::Entrance, EventKind::Exit] {
            for _ in 0..tree.count_event(kind) {
                counts.increment(kind);
            }
        }

        let mut pool = collect_all(tree);
        let mut report = PlacementReport::default();

        let path = trace_path(tree);
        if path.len() >= MIN_KEY_PATH_LEN {
            let key_index = 1 + rng.rn2((path.len() - 2) as u32) as usize;
            let key = path[key_index];
            tree.set_event(key, EventKind::Key)?;
            counts.increment(EventKind::Key);
            report.key = Some(key);
            report.key_path_index = Some(key_index);
            debug!("key at path index {} of {}", key_index, path.len());

            let root = tree.root();
            let candidates: Vec<Index> = pool
                .iter()
                .copied()
                .filter(|&idx| idx != key && Some(idx) != root)
                .filter(|&idx| tree.depth_of(idx) > key_index)
                .collect();
            if let Some(&door) = rng.choose(&candidates) {
                tree.set_event(door, EventKind::Door)?;
                counts.increment(EventKind::Door);
                report.door = Some(door);
                debug!(
                    "door at depth {} among {} candidates",
                    tree.depth_of(door),
                    candidates.len()
                );
            }
        } else {
            debug!("greedy path too short for key/door: {}", path.len());
        }

        pool.retain(|&idx| Some(idx) != report.key && Some(idx) != report.door);
        rng.shuffle(&mut pool);

        for idx in pool {
            let choices = self.table.hazard_candidates(&counts);
            let event = rng.choose(&choices).copied().unwrap_or(EventKind::Standard);
            tree.set_event(idx, event)?;
            counts.increment(event);
        }

        if let (Some(key), None) = (report.key, report.door) {
            tree.set_event(key, EventKind::Standard)?;
            counts.decrement(EventKind::Key);
            counts.increment(EventKind::Standard);
            report.key = None;
            report.warnings.push(PlacementWarning::KeyWithoutDoor);
        }
        if report.door.is_some() && report.key.is_none() {
            report.warnings.push(PlacementWarning::DoorWithoutKey);
        }
        for warning in &report.warnings {
            warn!("{}", warning);
        }

        Ok(report)
    }

    /// Placement returning only the warning texts.
    pub fn place_events_warnings<R: RandomSource>(
        &self,
        tree: &mut MazeTree,
        rng: &mut R,
    ) -> DomainResult<Vec<String>> {
        let report = self.place_events(tree, rng)?;
        Ok(report.warnings.iter().map(ToString::to_string).collect())
    }
}
