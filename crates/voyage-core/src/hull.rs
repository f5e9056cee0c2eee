//! Ship Hull
//!
//! Hull integrity (0-100) and the derived seaworthy flag, recomputed after
//! every change.

use voyage_events::{HullSnapshot, ResourceCategory, ResourceType};

use crate::config::{HullConfig, ResourceTable};
use crate::error::{positive_amount, CommandError};
use crate::ledger::ResourceLedger;

pub const HULL_MAX: f32 = 100.0;

#[derive(Debug, Clone)]
pub struct ShipHull {
    integrity: f32,
    seaworthy: bool,
    daily_decay: f32,
}

impl ShipHull {
    pub fn new(initial_integrity: f32, daily_decay: f32) -> Self {
        let mut hull = Self {
            integrity: initial_integrity,
            seaworthy: true,
            daily_decay,
        };
        hull.settle();
        hull
    }

    pub fn from_config(config: &HullConfig) -> Self {
        Self::new(config.initial_integrity, config.daily_decay)
    }

    pub fn integrity(&self) -> f32 {
        self.integrity
    }

    pub fn is_seaworthy(&self) -> bool {
        self.seaworthy
    }

    pub fn daily_decay(&self) -> f32 {
        self.daily_decay
    }

    fn settle(&mut self) {
        self.integrity = self.integrity.clamp(0.0, HULL_MAX);
        self.seaworthy = self.integrity > 0.0;
    }

    /// Applies one day of wear. Returns the (non-positive) change.
    pub fn daily_deterioration(&mut self) -> f32 {
        let before = self.integrity;
        self.integrity -= self.daily_decay;
        self.settle();
        self.integrity - before
    }

    /// Spends `amount` units of `material` from the ledger to patch the hull.
    ///
    /// Integrity rises by `amount` times the material's repair ratio. Returns
    /// the actual change after clamping.
    pub fn repair(
        &mut self,
        ledger: &mut ResourceLedger,
        table: &ResourceTable,
        material: ResourceType,
        amount: i32,
    ) -> Result<f32, CommandError> {
        let units = positive_amount(amount)?;
        let spec = table
            .get(material)
            .ok_or(CommandError::UnknownResource { resource: material })?;
        if spec.category != ResourceCategory::Material {
            return Err(CommandError::InvalidCategory {
                resource: material,
                category: spec.category,
            });
        }
        ledger.consume(material, amount)?;

        let before = self.integrity;
        self.integrity += units as f32 * spec.hull_repair;
        self.settle();
        tracing::debug!(
            "hull repaired with {} {}: {:.1} -> {:.1}",
            units,
            material,
            before,
            self.integrity
        );
        Ok(self.integrity - before)
    }

    pub fn snapshot(&self) -> HullSnapshot {
        HullSnapshot {
            integrity: self.integrity,
            seaworthy: self.seaworthy,
        }
    }
}
