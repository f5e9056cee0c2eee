//! Day Phases
//!
//! The segments of a voyage day and the single legal successor of each.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One segment of a day, plus the pre-start and terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Before the first day has started
    #[default]
    None,
    Morning,
    Diving,
    Evening,
    /// Terminal state, entered once an outcome has been produced
    GameOver,
}

impl Phase {
    /// Returns the only phase that may follow this one.
    ///
    /// `Evening -> Morning` is the day boundary and is only reached through
    /// day completion. `GameOver` has no successor.
    pub fn successor(self) -> Option<Phase> {
        match self {
            Phase::None => Some(Phase::Morning),
            Phase::Morning => Some(Phase::Diving),
            Phase::Diving => Some(Phase::Evening),
            Phase::Evening => Some(Phase::Morning),
            Phase::GameOver => None,
        }
    }

    /// Returns true if `target` is the legal successor of this phase.
    pub fn can_advance_to(self, target: Phase) -> bool {
        self.successor() == Some(target)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver)
    }

    /// Returns true for the three in-day phases.
    pub fn is_daytime(self) -> bool {
        matches!(self, Phase::Morning | Phase::Diving | Phase::Evening)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::None => write!(f, "none"),
            Phase::Morning => write!(f, "morning"),
            Phase::Diving => write!(f, "diving"),
            Phase::Evening => write!(f, "evening"),
            Phase::GameOver => write!(f, "game_over"),
        }
    }
}
