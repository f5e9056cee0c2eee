//! Resource Allocation
//!
//! Moves resource units from the shared ledger to one crew member. Every
//! check runs before anything is mutated, so a rejected allocation leaves
//! both the ledger and the roster exactly as they were.
//!
//! Checks, in order:
//! 1. the voyage is in the Evening phase
//! 2. the amount is positive
//! 3. the crew member exists and is alive
//! 4. the resource feeds a vital and its category was not received today
//! 5. the ledger can cover the amount

use voyage_events::{CrewId, Phase, ResourceType};

use crate::config::{ResourceSpec, ResourceTable};
use crate::crew::{CrewRoster, Vitals};
use crate::error::{positive_amount, CommandError};
use crate::ledger::ResourceLedger;

/// One validated transfer. Lives only for the duration of the commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationRecord {
    pub crew_id: CrewId,
    pub resource: ResourceType,
    pub amount: u32,
}

/// Result of a committed allocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationReceipt {
    pub record: AllocationRecord,
    /// Actual gauge increase after clamping
    pub gained: Vitals,
    /// Ledger quantity left after the transfer
    pub remaining: u32,
}

/// Borrowed view over the state an allocation touches.
pub struct Allocation<'a, 't> {
    phase: Phase,
    ledger: &'a mut ResourceLedger,
    roster: &'a mut CrewRoster,
    table: &'t ResourceTable,
}

impl<'a, 't> Allocation<'a, 't> {
    pub fn new(
        phase: Phase,
        ledger: &'a mut ResourceLedger,
        roster: &'a mut CrewRoster,
        table: &'t ResourceTable,
    ) -> Self {
        Self {
            phase,
            ledger,
            roster,
            table,
        }
    }

    /// Runs checks 1-4 without touching any state.
    pub fn validate(
        &self,
        crew_id: CrewId,
        resource: ResourceType,
        amount: i32,
    ) -> Result<(AllocationRecord, &'t ResourceSpec), CommandError> {
        if self.phase != Phase::Evening {
            return Err(CommandError::ActionOutsidePhase {
                action: "distributing supplies",
                phase: self.phase,
            });
        }

        let amount = positive_amount(amount)?;
        let member = self.roster.living(crew_id)?;

        let table: &'t ResourceTable = self.table;
        let spec = table
            .get(resource)
            .ok_or(CommandError::UnknownResource { resource })?;
        if spec.category.vital().is_none() {
            return Err(CommandError::InvalidCategory {
                resource,
                category: spec.category,
            });
        }
        if member.has_received(spec.category) {
            return Err(CommandError::AlreadyReceivedToday {
                crew_id,
                category: spec.category,
            });
        }

        Ok((
            AllocationRecord {
                crew_id,
                resource,
                amount,
            },
            spec,
        ))
    }

    /// Validates, then consumes from the ledger and applies to the crew member.
    pub fn assign(
        self,
        crew_id: CrewId,
        resource: ResourceType,
        amount: i32,
    ) -> Result<AllocationReceipt, CommandError> {
        let (record, spec) = self.validate(crew_id, resource, amount)?;

        let remaining = self.ledger.consume(resource, amount)?;
        let member = self
            .roster
            .get_mut(crew_id)
            .ok_or(CommandError::UnknownCrew { crew_id })?;
        let gained = member.receive(spec, record.amount);

        tracing::debug!(
            "{} received {} {} (hunger +{:.1}, thirst +{:.1}, temperature +{:.1})",
            crew_id,
            record.amount,
            resource,
            gained.hunger,
            gained.thirst,
            gained.temperature
        );

        Ok(AllocationReceipt {
            record,
            gained,
            remaining,
        })
    }
}
