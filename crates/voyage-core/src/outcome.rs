//! Outcome Evaluation
//!
//! Decides, once per completed day, whether the voyage has ended and why.

use voyage_events::{GameOutcome, OutcomeReason};

use crate::crew::CrewRoster;
use crate::hull::ShipHull;

#[derive(Debug, Clone, Copy)]
pub struct OutcomeEvaluator {
    max_days: u32,
}

impl OutcomeEvaluator {
    pub fn new(max_days: u32) -> Self {
        Self { max_days }
    }

    pub fn max_days(&self) -> u32 {
        self.max_days
    }

    /// Evaluates the post-decay state of the voyage.
    pub fn evaluate(&self, day: u32, roster: &CrewRoster, hull: &ShipHull) -> Option<GameOutcome> {
        self.evaluate_counts(day, roster.alive_count(), roster.total(), hull.integrity())
    }

    /// Priority: reaching the day limit wins even if nobody is left alive,
    /// then crew loss, then hull loss.
    pub fn evaluate_counts(
        &self,
        day: u32,
        alive: usize,
        total: usize,
        integrity: f32,
    ) -> Option<GameOutcome> {
        let reason = if day >= self.max_days {
            OutcomeReason::Victory
        } else if alive == 0 {
            OutcomeReason::AllCrewDead
        } else if integrity <= 0.0 {
            OutcomeReason::ShipDestroyed
        } else {
            return None;
        };
        Some(GameOutcome::new(reason, day, alive, total, integrity))
    }
}
