//! Voyage Context
//!
//! The constructed simulation context. Owns the ledger, roster, hull and
//! phase controller, routes every command through them and records what
//! happened in the outbound event queue.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use voyage_events::{
    generate_snapshot_id, CrewId, Event, EventKind, GameOutcome, Phase, ResourceType,
    VoyageSnapshot,
};

use crate::allocation::{Allocation, AllocationReceipt};
use crate::config::{ConfigError, ResourceTable, VoyageConfig};
use crate::crew::{CrewMember, CrewRoster};
use crate::error::{positive_amount, CommandError};
use crate::events::EventQueue;
use crate::hull::ShipHull;
use crate::ledger::ResourceLedger;
use crate::phase::{DayReport, PhaseController, PhaseTransition};

fn rejected(command: &str, err: &CommandError) {
    tracing::debug!("{} rejected ({}): {}", command, err.kind(), err);
}

pub struct Voyage {
    table: ResourceTable,
    repair_material: ResourceType,
    ledger: ResourceLedger,
    roster: CrewRoster,
    hull: ShipHull,
    controller: PhaseController,
    rng: SmallRng,
    events: EventQueue,
    snapshot_sequence: u64,
}

impl Voyage {
    /// Builds a voyage from a validated config, seeding decay from `[voyage].seed`.
    pub fn new(config: &VoyageConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, config.voyage.seed)
    }

    pub fn with_seed(config: &VoyageConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let table = config.resource_table();
        Ok(Self {
            ledger: ResourceLedger::from_table(&table),
            roster: CrewRoster::from_presets(&config.crew),
            hull: ShipHull::from_config(&config.hull),
            controller: PhaseController::new(config.voyage.max_days),
            repair_material: config.hull.repair_material,
            rng: SmallRng::seed_from_u64(seed),
            events: EventQueue::new(),
            snapshot_sequence: 0,
            table,
        })
    }

    fn emit(&mut self, kind: EventKind) {
        let event = self.events.push(self.controller.day(), self.controller.phase(), kind);
        tracing::trace!("event {} {}", event.event_id, event.kind.name());
    }

    fn ensure_running(&self) -> Result<(), CommandError> {
        if self.controller.is_over() {
            return Err(CommandError::GameOver);
        }
        Ok(())
    }

    fn emit_transition(&mut self, transition: PhaseTransition) {
        self.emit(EventKind::PhaseChanged {
            from: transition.from,
            to: transition.to,
        });
    }

    fn emit_hull_change(&mut self, delta: f32) {
        self.emit(EventKind::HullChanged {
            integrity: self.hull.integrity(),
            delta,
        });
    }

    // === COMMANDS ===

    /// Begins day one.
    pub fn start_day(&mut self) -> Result<PhaseTransition, CommandError> {
        let transition = self
            .controller
            .start_day(&mut self.roster)
            .inspect_err(|e| rejected("start_day", e))?;
        self.emit_transition(transition);
        self.emit(EventKind::DayStarted);
        Ok(transition)
    }

    /// Advances to `target` if it is the legal successor.
    ///
    /// Morning is reached through the day boundary: from None it starts the
    /// voyage, from Evening it runs the full `complete_day` pipeline.
    pub fn request_phase_change(&mut self, target: Phase) -> Result<PhaseTransition, CommandError> {
        match (self.controller.phase(), target) {
            (Phase::None, Phase::Morning) => self.start_day(),
            (Phase::Evening, Phase::Morning) => self.complete_day().map(|report| report.transition),
            _ => {
                let transition = self
                    .controller
                    .request_phase_change(target)
                    .inspect_err(|e| rejected("phase change", e))?;
                self.emit_transition(transition);
                Ok(transition)
            }
        }
    }

    /// Ends the Evening and runs decay and outcome evaluation.
    pub fn complete_day(&mut self) -> Result<DayReport, CommandError> {
        let report = self
            .controller
            .complete_day(&mut self.roster, &mut self.hull, &mut self.rng)
            .inspect_err(|e| rejected("complete_day", e))?;

        // Decay belongs to the day that just ended
        let day = report.completed_day;
        for crew_id in &report.deaths {
            let name = self
                .roster
                .get(*crew_id)
                .map(|m| m.name().to_string())
                .unwrap_or_default();
            self.events.push(
                day,
                Phase::Evening,
                EventKind::CrewDied {
                    crew_id: *crew_id,
                    name,
                },
            );
        }
        self.events.push(
            day,
            Phase::Evening,
            EventKind::HullChanged {
                integrity: report.hull_after,
                delta: report.hull_delta(),
            },
        );

        self.emit_transition(report.transition);
        match &report.outcome {
            Some(outcome) => self.emit(EventKind::GameEnded {
                outcome: outcome.clone(),
            }),
            None => self.emit(EventKind::DayStarted),
        }
        Ok(report)
    }

    /// Gives `amount` units of `resource` to a crew member. Evening only.
    pub fn assign(
        &mut self,
        crew_id: CrewId,
        resource: ResourceType,
        amount: i32,
    ) -> Result<AllocationReceipt, CommandError> {
        let phase = self.controller.phase();
        let receipt = self
            .ensure_running()
            .and_then(|_| {
                Allocation::new(phase, &mut self.ledger, &mut self.roster, &self.table)
                    .assign(crew_id, resource, amount)
            })
            .inspect_err(|e| rejected("assign", e))?;

        self.emit(EventKind::ResourceAssigned {
            crew_id,
            resource,
            amount: receipt.record.amount,
        });
        self.emit(EventKind::ResourceChanged {
            resource,
            delta: -i64::from(receipt.record.amount),
        });
        Ok(receipt)
    }

    /// Adds stock, e.g. loot collected while diving. Returns the new quantity.
    pub fn add_resource(
        &mut self,
        resource: ResourceType,
        amount: i32,
    ) -> Result<u32, CommandError> {
        let added = self
            .ensure_running()
            .and_then(|_| positive_amount(amount))
            .inspect_err(|e| rejected("add_resource", e))?;
        self.ledger.add(resource, amount);
        self.emit(EventKind::ResourceChanged {
            resource,
            delta: i64::from(added),
        });
        Ok(self.ledger.amount(resource))
    }

    /// Direct ledger use outside allocation. Returns the remaining quantity.
    pub fn consume_resource(
        &mut self,
        resource: ResourceType,
        amount: i32,
    ) -> Result<u32, CommandError> {
        let remaining = self
            .ensure_running()
            .and_then(|_| self.ledger.consume(resource, amount))
            .inspect_err(|e| rejected("consume_resource", e))?;
        self.emit(EventKind::ResourceChanged {
            resource,
            delta: -i64::from(amount),
        });
        Ok(remaining)
    }

    /// Repairs the hull with the configured repair material.
    pub fn repair_ship(&mut self, amount: i32) -> Result<f32, CommandError> {
        self.repair_ship_with(self.repair_material, amount)
    }

    /// Repairs the hull with a specific material. Returns the integrity gained.
    pub fn repair_ship_with(
        &mut self,
        material: ResourceType,
        amount: i32,
    ) -> Result<f32, CommandError> {
        let gained = self
            .ensure_running()
            .and_then(|_| self.hull.repair(&mut self.ledger, &self.table, material, amount))
            .inspect_err(|e| rejected("repair_ship", e))?;
        self.emit(EventKind::ResourceChanged {
            resource: material,
            delta: -i64::from(amount),
        });
        self.emit_hull_change(gained);
        Ok(gained)
    }

    /// Takes every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain()
    }

    // === QUERIES ===

    pub fn current_day(&self) -> u32 {
        self.controller.day()
    }

    pub fn current_phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn max_days(&self) -> u32 {
        self.controller.max_days()
    }

    pub fn resource_amount(&self, resource: ResourceType) -> u32 {
        self.ledger.amount(resource)
    }

    pub fn crew_members(&self) -> &[CrewMember] {
        self.roster.members()
    }

    pub fn crew(&self, crew_id: CrewId) -> Option<&CrewMember> {
        self.roster.get(crew_id)
    }

    pub fn alive_count(&self) -> usize {
        self.roster.alive_count()
    }

    pub fn ship_integrity(&self) -> f32 {
        self.hull.integrity()
    }

    pub fn is_seaworthy(&self) -> bool {
        self.hull.is_seaworthy()
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.controller.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.controller.is_over()
    }

    pub fn repair_material(&self) -> ResourceType {
        self.repair_material
    }

    pub fn resource_table(&self) -> &ResourceTable {
        &self.table
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    pub fn roster(&self) -> &CrewRoster {
        &self.roster
    }

    pub fn hull(&self) -> &ShipHull {
        &self.hull
    }

    /// Serializable picture of the whole voyage.
    pub fn snapshot(&mut self) -> VoyageSnapshot {
        self.snapshot_sequence += 1;
        VoyageSnapshot {
            snapshot_id: generate_snapshot_id(self.snapshot_sequence),
            day: self.controller.day(),
            max_days: self.controller.max_days(),
            phase: self.controller.phase(),
            hull: self.hull.snapshot(),
            resources: self.ledger.stocks(),
            crew: self.roster.members().iter().map(CrewMember::snapshot).collect(),
            outcome: self.controller.outcome().cloned(),
        }
    }
}
