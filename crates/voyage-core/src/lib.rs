//! Voyage Survival Core
//!
//! The survival economy of the day/night voyage: crew vitals, the shared
//! resource ledger, hull integrity, evening allocation and the phase cycle
//! that ties them together.

pub mod allocation;
pub mod autopilot;
pub mod config;
pub mod crew;
pub mod error;
pub mod events;
pub mod hull;
pub mod ledger;
pub mod outcome;
pub mod phase;
pub mod voyage;

pub use allocation::{Allocation, AllocationReceipt, AllocationRecord};
pub use autopilot::{Autopilot, DayLog};
pub use config::{ConfigError, CrewPreset, ResourceSpec, ResourceTable, VoyageConfig};
pub use crew::{CrewMember, CrewRoster, DecayRange, DecayRanges, Vitals};
pub use error::CommandError;
pub use events::{EventLogger, EventQueue};
pub use hull::ShipHull;
pub use ledger::ResourceLedger;
pub use outcome::OutcomeEvaluator;
pub use phase::{DayReport, PhaseController, PhaseTransition};
pub use voyage::Voyage;
