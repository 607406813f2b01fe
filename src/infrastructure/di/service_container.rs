//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::{GameService, MazeService};
use crate::config::Settings;
use crate::domain::{EventTable, GameRng};
use crate::infrastructure::traits::{Console, StdConsole};

/// Container holding settings, the event table and service factories.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Event table shared by generation and the rules screen
    pub table: EventTable,
}

impl ServiceContainer {
    /// Create a new service container with the default event table.
    pub fn new(settings: Settings) -> Self {
        Self::with_table(settings, EventTable::default())
    }

    /// Create a service container with a custom event table (for testing).
    pub fn with_table(settings: Settings, table: EventTable) -> Self {
        Self {
            settings: Arc::new(settings),
            table,
        }
    }

    /// Generator seeded from the command line, the settings, or entropy.
    pub fn rng(&self, seed_override: Option<u64>) -> GameRng {
        let rng = match seed_override.or(self.settings.seed) {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        debug!("rng seed: {}", rng.seed());
        rng
    }

    pub fn maze_service(&self) -> MazeService {
        MazeService::new(self.table.clone())
    }

    /// Game service on the process terminal.
    pub fn game_service(&self) -> GameService<StdConsole> {
        self.game_service_with(StdConsole)
    }

    pub fn game_service_with<C: Console>(&self, console: C) -> GameService<C> {
        GameService::new(console)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RandomSource;

    #[test]
    fn test_seed_override_beats_settings() {
        let settings = Settings {
            seed: Some(5),
            ..Settings::default()
        };
        let container = ServiceContainer::new(settings);
        assert_eq!(container.rng(None).seed(), 5);
        assert_eq!(container.rng(Some(9)).seed(), 9);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let container = ServiceContainer::new(Settings::default());
        let mut a = container.rng(Some(3));
        let mut b = container.rng(Some(3));
        let draws_a: Vec<u32> = (0..8).map(|_| a.rn2(100)).collect();
        let draws_b: Vec<u32> = (0..8).map(|_| b.rn2(100)).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_maze_service_uses_container_table() {
        let container = ServiceContainer::with_table(Settings::default(), EventTable::new(vec![]));
        assert!(container.maze_service().table().is_empty());
    }
}
