//! Command Errors
//!
//! Every rejected command reports one of these. None of them is fatal; the
//! caller surfaces the message to the player and carries on.

use thiserror::Error;
use voyage_events::{CrewId, Phase, ResourceCategory, ResourceType};

/// Why a command was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// Requested phase is not the legal successor of the current one
    #[error("cannot move from {from} to {to}")]
    InvalidPhaseTransition { from: Phase, to: Phase },

    /// Day completion requested outside the Evening phase
    #[error("the day can only be completed in the evening (currently {phase})")]
    InvalidDayCompletion { phase: Phase },

    /// A phase-gated action was issued in the wrong phase
    #[error("{action} is not possible during {phase}")]
    ActionOutsidePhase { action: &'static str, phase: Phase },

    #[error("no crew member with id {crew_id}")]
    UnknownCrew { crew_id: CrewId },

    #[error("{crew_id} is dead")]
    DeadCrewTarget { crew_id: CrewId },

    #[error("{crew_id} already received {category} today")]
    AlreadyReceivedToday {
        crew_id: CrewId,
        category: ResourceCategory,
    },

    #[error("not enough {resource}: requested {requested}, have {available}")]
    InsufficientResource {
        resource: ResourceType,
        requested: u32,
        available: u32,
    },

    /// The resource's category cannot be used for this operation
    #[error("{resource} ({category}) cannot be used here")]
    InvalidCategory {
        resource: ResourceType,
        category: ResourceCategory,
    },

    /// The resource has no entry in the metadata table
    #[error("{resource} is not configured for this voyage")]
    UnknownResource { resource: ResourceType },

    #[error("amount must be positive, got {amount}")]
    InvalidAmount { amount: i32 },

    /// The voyage has ended; no further commands are accepted
    #[error("the voyage is over")]
    GameOver,
}

impl CommandError {
    /// Short machine name for logs and UI lookups.
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::InvalidPhaseTransition { .. } => "invalid_phase_transition",
            CommandError::InvalidDayCompletion { .. } => "invalid_day_completion",
            CommandError::ActionOutsidePhase { .. } => "action_outside_phase",
            CommandError::UnknownCrew { .. } => "unknown_crew",
            CommandError::DeadCrewTarget { .. } => "dead_crew_target",
            CommandError::AlreadyReceivedToday { .. } => "already_received_today",
            CommandError::InsufficientResource { .. } => "insufficient_resource",
            CommandError::InvalidCategory { .. } => "invalid_category",
            CommandError::UnknownResource { .. } => "unknown_resource",
            CommandError::InvalidAmount { .. } => "invalid_amount",
            CommandError::GameOver => "game_over",
        }
    }
}

/// Converts a caller-supplied amount into a strictly positive quantity.
pub(crate) fn positive_amount(amount: i32) -> Result<u32, CommandError> {
    match u32::try_from(amount) {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(CommandError::InvalidAmount { amount }),
    }
}
