//! Room events: the fixed event alphabet and its occurrence limits.

use std::collections::BTreeMap;
use std::fmt;

/// Tag carried by every room of the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Entrance,
    Exit,
    FallTrap,
    RandomMove,
    MemoryLoss,
    Fog,
    Door,
    Key,
    Standard,
}

impl EventKind {
    pub const ALL: [EventKind; 9] = [
        EventKind::Entrance,
        EventKind::Exit,
        EventKind::FallTrap,
        EventKind::RandomMove,
        EventKind::MemoryLoss,
        EventKind::Fog,
        EventKind::Door,
        EventKind::Key,
        EventKind::Standard,
    ];

    /// Single-letter code shown on the map.
    pub fn letter(self) -> char {
        match self {
            EventKind::Entrance => 'E',
            EventKind::Exit => 'S',
            EventKind::FallTrap => 'U',
            EventKind::RandomMove => 'A',
            EventKind::MemoryLoss => 'R',
            EventKind::Fog => 'B',
            EventKind::Door => 'D',
            EventKind::Key => 'K',
            EventKind::Standard => 'X',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.letter() == letter)
    }

    /// Entrance, Exit, Key and Door are placed by structural rules and never
    /// handed out by the generic assignment pass.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            EventKind::Entrance | EventKind::Exit | EventKind::Key | EventKind::Door
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One row of the event table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventType {
    pub kind: EventKind,
    /// Text shown to the player in the rules screen
    pub description: &'static str,
    /// Maximum uses per maze, `None` for unbounded
    pub max_occurrences: Option<u32>,
}

impl EventType {
    pub fn letter(&self) -> char {
        self.kind.letter()
    }
}

/// Immutable event configuration, built once and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTable {
    entries: Vec<EventType>,
}

impl Default for EventTable {
    fn default() -> Self {
        Self::new(vec![
            EventType {
                kind: EventKind::Entrance,
                description: "Entrance",
                max_occurrences: Some(1),
            },
            EventType {
                kind: EventKind::Exit,
                description: "Exit",
                max_occurrences: Some(1),
            },
            EventType {
                kind: EventKind::FallTrap,
                description: "You fall out of the tree! Back to the start",
                max_occurrences: Some(1),
            },
            EventType {
                kind: EventKind::RandomMove,
                description: "Your next move will be random",
                max_occurrences: Some(1),
            },
            EventType {
                kind: EventKind::MemoryLoss,
                description: "You lost your memory, you no longer know where you are",
                max_occurrences: Some(1),
            },
            EventType {
                kind: EventKind::Fog,
                description: "There is a lot of fog here ...",
                max_occurrences: Some(1),
            },
            EventType {
                kind: EventKind::Door,
                description: "A locked door blocks the way. Find the key",
                max_occurrences: Some(1),
            },
            EventType {
                kind: EventKind::Key,
                description: "You found a key",
                max_occurrences: Some(1),
            },
            EventType {
                kind: EventKind::Standard,
                description: "Standard room",
                max_occurrences: None,
            },
        ])
    }
}

impl EventTable {
    pub fn new(entries: Vec<EventType>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventType> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, kind: EventKind) -> Option<&EventType> {
        self.entries.iter().find(|entry| entry.kind == kind)
    }

    /// Non-structural events that still have room under their limit, in table order.
    pub fn hazard_candidates(&self, counts: &EventCounts) -> Vec<EventKind> {
        self.entries
            .iter()
            .filter(|entry| !entry.kind.is_structural())
            .filter(|entry| counts.allows(entry))
            .map(|entry| entry.kind)
            .collect()
    }
}

/// Per-event occurrence counter for one generated maze.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventCounts {
    counts: BTreeMap<EventKind, u32>,
}

impl EventCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: EventKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, kind: EventKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    pub fn decrement(&mut self, kind: EventKind) {
        if let Some(count) = self.counts.get_mut(&kind) {
            *count = count.saturating_sub(1);
        }
    }

    /// True while `event_type` is unbounded or below its limit.
    pub fn allows(&self, event_type: &EventType) -> bool {
        match event_type.max_occurrences {
            None => true,
            Some(max) => self.get(event_type.kind) < max,
        }
    }
}
