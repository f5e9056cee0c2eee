//! Snapshot Types
//!
//! Serialization structs capturing the complete state of a voyage at a point
//! in time, used by presentation layers, analysis and debugging.

use serde::{Deserialize, Serialize};

use crate::{CrewId, CrewStatus, GameOutcome, Phase, ResourceType};

/// Generates a snapshot ID with the given sequence number.
pub fn generate_snapshot_id(sequence: u64) -> String {
    format!("snap_{:06}", sequence)
}

/// Full voyage state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoyageSnapshot {
    pub snapshot_id: String,
    pub day: u32,
    pub max_days: u32,
    pub phase: Phase,
    pub hull: HullSnapshot,
    #[serde(default)]
    pub resources: Vec<ResourceStock>,
    #[serde(default)]
    pub crew: Vec<CrewSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<GameOutcome>,
}

impl VoyageSnapshot {
    /// Number of crew members still alive in this snapshot.
    pub fn alive_count(&self) -> usize {
        self.crew.iter().filter(|c| c.alive).count()
    }

    /// Stock of a resource, 0 if it is not listed.
    pub fn stock_of(&self, resource: ResourceType) -> u32 {
        self.resources
            .iter()
            .find(|s| s.resource == resource)
            .map_or(0, |s| s.amount)
    }
}

/// Ship hull state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HullSnapshot {
    pub integrity: f32,
    pub seaworthy: bool,
}

/// Ledger quantity for one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStock {
    pub resource: ResourceType,
    pub amount: u32,
}

/// Crew member state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewSnapshot {
    pub crew_id: CrewId,
    pub name: String,
    pub hunger: f32,
    pub thirst: f32,
    pub temperature: f32,
    pub alive: bool,
    pub status: CrewStatus,
    #[serde(default)]
    pub received_food: bool,
    #[serde(default)]
    pub received_water: bool,
    #[serde(default)]
    pub received_medicine: bool,
}
