//! Game Outcome
//!
//! The terminal record produced once per voyage. Fields are private so that
//! an outcome cannot be altered after it has been created.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the voyage ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeReason {
    #[default]
    None,
    Victory,
    AllCrewDead,
    ShipDestroyed,
}

impl fmt::Display for OutcomeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeReason::None => write!(f, "none"),
            OutcomeReason::Victory => write!(f, "victory"),
            OutcomeReason::AllCrewDead => write!(f, "all crew dead"),
            OutcomeReason::ShipDestroyed => write!(f, "ship destroyed"),
        }
    }
}

/// End-game statistics; the only authoritative record of how a voyage ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    is_victory: bool,
    reason: OutcomeReason,
    day: u32,
    survived_crew: usize,
    total_crew: usize,
    ship_integrity: f32,
}

impl GameOutcome {
    /// Creates an outcome. `is_victory` is derived from the reason.
    pub fn new(
        reason: OutcomeReason,
        day: u32,
        survived_crew: usize,
        total_crew: usize,
        ship_integrity: f32,
    ) -> Self {
        Self {
            is_victory: reason == OutcomeReason::Victory,
            reason,
            day,
            survived_crew,
            total_crew,
            ship_integrity,
        }
    }

    pub fn is_victory(&self) -> bool {
        self.is_victory
    }

    pub fn reason(&self) -> OutcomeReason {
        self.reason
    }

    /// Day reached when the outcome was produced
    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn survived_crew(&self) -> usize {
        self.survived_crew
    }

    pub fn total_crew(&self) -> usize {
        self.total_crew
    }

    /// Hull integrity at the moment the voyage ended
    pub fn ship_integrity(&self) -> f32 {
        self.ship_integrity
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_victory { "Victory" } else { "Defeat" };
        write!(
            f,
            "{} ({}) on day {}: {}/{} crew survived, hull at {:.0}",
            verdict, self.reason, self.day, self.survived_crew, self.total_crew, self.ship_integrity
        )
    }
}
