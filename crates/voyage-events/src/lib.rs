//! Shared record types for the voyage survival simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for every other crate in the workspace, so that
//! presentation layers can consume events and snapshots without pulling in
//! the simulation core.

pub mod crew;
pub mod event;
pub mod outcome;
pub mod phase;
pub mod resource;
pub mod snapshot;

pub use crew::{CrewId, CrewStatus};
pub use event::{generate_event_id, Event, EventKind};
pub use outcome::{GameOutcome, OutcomeReason};
pub use phase::Phase;
pub use resource::{ParseResourceError, ResourceCategory, ResourceType, Vital};
pub use snapshot::{
    generate_snapshot_id, CrewSnapshot, HullSnapshot, ResourceStock, VoyageSnapshot,
};
