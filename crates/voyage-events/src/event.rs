//! Event Types
//!
//! Notifications emitted by the simulation core for presentation layers.
//! Events are fire-and-forget records; consumers never mutate core state
//! from inside their handling of an event.

use serde::{Deserialize, Serialize};

use crate::{CrewId, GameOutcome, Phase, ResourceType};

/// What happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A new day began in the Morning phase; the day is `Event::day`
    DayStarted,
    PhaseChanged { from: Phase, to: Phase },
    /// A crew member died during daily deterioration
    CrewDied { crew_id: CrewId, name: String },
    /// The ledger quantity of a resource changed by `delta`
    ResourceChanged { resource: ResourceType, delta: i64 },
    /// A resource unit was handed to a crew member
    ResourceAssigned {
        crew_id: CrewId,
        resource: ResourceType,
        amount: u32,
    },
    HullChanged { integrity: f32, delta: f32 },
    GameEnded { outcome: GameOutcome },
}

impl EventKind {
    /// Short machine name, matching the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::DayStarted => "day_started",
            EventKind::PhaseChanged { .. } => "phase_changed",
            EventKind::CrewDied { .. } => "crew_died",
            EventKind::ResourceChanged { .. } => "resource_changed",
            EventKind::ResourceAssigned { .. } => "resource_assigned",
            EventKind::HullChanged { .. } => "hull_changed",
            EventKind::GameEnded { .. } => "game_ended",
        }
    }
}

/// A single notification with its place in the voyage timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    pub day: u32,
    pub phase: Phase,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    pub fn new(event_id: impl Into<String>, day: u32, phase: Phase, kind: EventKind) -> Self {
        Self {
            event_id: event_id.into(),
            day,
            phase,
            kind,
        }
    }

    /// Serializes the event to a single JSON line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes an event from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Generates an event ID with the given sequence number.
pub fn generate_event_id(sequence: u64) -> String {
    format!("evt_{:06}", sequence)
}
