//! Crew Roster
//!
//! Owns every crew member's vitals. Gauges only go down in
//! [`CrewRoster::daily_deterioration`] and only go up when a resource is
//! applied; both paths clamp to `[0, 100]` after every change.

use rand::Rng;
use serde::{Deserialize, Serialize};

use voyage_events::{CrewId, CrewSnapshot, CrewStatus, ResourceCategory, ResourceType, Vital};

use crate::config::{CrewPreset, ResourceSpec, ResourceTable};
use crate::error::{positive_amount, CommandError};

pub const VITAL_MIN: f32 = 0.0;
pub const VITAL_MAX: f32 = 100.0;

/// One value per vital. Used for gauges, recovery multipliers and deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub hunger: f32,
    pub thirst: f32,
    pub temperature: f32,
}

impl Vitals {
    pub fn new(hunger: f32, thirst: f32, temperature: f32) -> Self {
        Self {
            hunger,
            thirst,
            temperature,
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value)
    }

    pub fn full() -> Self {
        Self::uniform(VITAL_MAX)
    }

    pub fn zero() -> Self {
        Self::uniform(VITAL_MIN)
    }

    pub fn get(&self, vital: Vital) -> f32 {
        match vital {
            Vital::Hunger => self.hunger,
            Vital::Thirst => self.thirst,
            Vital::Temperature => self.temperature,
        }
    }

    pub fn get_mut(&mut self, vital: Vital) -> &mut f32 {
        match vital {
            Vital::Hunger => &mut self.hunger,
            Vital::Thirst => &mut self.thirst,
            Vital::Temperature => &mut self.temperature,
        }
    }

    /// Lowest of the three values.
    pub fn lowest(&self) -> f32 {
        self.hunger.min(self.thirst).min(self.temperature)
    }

    fn clamp_all(&mut self) {
        for vital in Vital::all() {
            let value = self.get_mut(vital);
            *value = value.clamp(VITAL_MIN, VITAL_MAX);
        }
    }
}

/// Inclusive range a daily decrease is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayRange {
    pub min: f32,
    pub max: f32,
}

impl DecayRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A range that always yields `amount`.
    pub fn fixed(amount: f32) -> Self {
        Self::new(amount, amount)
    }

    /// Draws one decrease uniformly from the range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max <= self.min {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

/// Per-vital daily decay ranges of one crew member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayRanges {
    pub hunger: DecayRange,
    pub thirst: DecayRange,
    pub temperature: DecayRange,
}

impl DecayRanges {
    pub fn new(hunger: DecayRange, thirst: DecayRange, temperature: DecayRange) -> Self {
        Self {
            hunger,
            thirst,
            temperature,
        }
    }

    pub fn uniform(range: DecayRange) -> Self {
        Self::new(range, range, range)
    }

    pub fn get(&self, vital: Vital) -> DecayRange {
        match vital {
            Vital::Hunger => self.hunger,
            Vital::Thirst => self.thirst,
            Vital::Temperature => self.temperature,
        }
    }
}

/// Which categories a crew member has already been given today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReceivedFlags {
    pub food: bool,
    pub water: bool,
    pub medicine: bool,
}

impl ReceivedFlags {
    /// Material is never handed out, so it is never "received".
    pub fn has(&self, category: ResourceCategory) -> bool {
        match category {
            ResourceCategory::Food => self.food,
            ResourceCategory::Water => self.water,
            ResourceCategory::Medicine => self.medicine,
            ResourceCategory::Material => false,
        }
    }

    fn mark(&mut self, category: ResourceCategory) {
        match category {
            ResourceCategory::Food => self.food = true,
            ResourceCategory::Water => self.water = true,
            ResourceCategory::Medicine => self.medicine = true,
            ResourceCategory::Material => {}
        }
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A single crew member.
#[derive(Debug, Clone)]
pub struct CrewMember {
    id: CrewId,
    name: String,
    vitals: Vitals,
    alive: bool,
    received: ReceivedFlags,
    decay: DecayRanges,
    recovery: Vitals,
    critical_threshold: f32,
    poor_threshold: f32,
}

impl CrewMember {
    pub fn from_preset(preset: &CrewPreset) -> Self {
        let mut vitals = preset.vitals;
        vitals.clamp_all();
        Self {
            id: preset.id,
            name: preset.name.clone(),
            vitals,
            alive: true,
            received: ReceivedFlags::default(),
            decay: preset.decay,
            recovery: preset.recovery,
            critical_threshold: preset.critical_threshold,
            poor_threshold: preset.poor_threshold,
        }
    }

    pub fn id(&self) -> CrewId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vitals(&self) -> Vitals {
        self.vitals
    }

    pub fn vital(&self, vital: Vital) -> f32 {
        self.vitals.get(vital)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn received(&self) -> ReceivedFlags {
        self.received
    }

    pub fn has_received(&self, category: ResourceCategory) -> bool {
        self.received.has(category)
    }

    /// Derives the status from the gauges and thresholds.
    pub fn status(&self) -> CrewStatus {
        if !self.alive {
            return CrewStatus::Dead;
        }
        let lowest = self.vitals.lowest();
        if lowest < self.critical_threshold {
            CrewStatus::Critical
        } else if lowest < self.poor_threshold {
            CrewStatus::Poor
        } else {
            CrewStatus::Healthy
        }
    }

    /// Applies one day of decay. Returns true if this call killed the member.
    pub(crate) fn deteriorate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.alive {
            return false;
        }
        for vital in Vital::all() {
            let loss = self.decay.get(vital).sample(rng);
            *self.vitals.get_mut(vital) -= loss;
        }
        self.vitals.clamp_all();

        if Vital::all().iter().any(|v| self.vitals.get(*v) <= VITAL_MIN) {
            self.die();
            return true;
        }
        false
    }

    fn die(&mut self) {
        self.alive = false;
        self.vitals = Vitals::zero();
        self.received.clear();
    }

    /// Raises the gauges `spec` restores and marks its category as received.
    ///
    /// Callers have already checked that the member is alive and that the
    /// category can be handed out. Returns the actual gain after clamping.
    pub(crate) fn receive(&mut self, spec: &ResourceSpec, amount: u32) -> Vitals {
        let mut gained = Vitals::zero();
        for vital in Vital::all() {
            let per_unit = spec.recovery(vital);
            if per_unit <= 0.0 {
                continue;
            }
            let before = self.vitals.get(vital);
            let after = (before + per_unit * amount as f32 * self.recovery.get(vital))
                .clamp(VITAL_MIN, VITAL_MAX);
            *self.vitals.get_mut(vital) = after;
            *gained.get_mut(vital) = after - before;
        }
        self.received.mark(spec.category);
        gained
    }

    fn reset_daily_flags(&mut self) {
        if self.alive {
            self.received.clear();
        }
    }

    pub fn snapshot(&self) -> CrewSnapshot {
        CrewSnapshot {
            crew_id: self.id,
            name: self.name.clone(),
            hunger: self.vitals.hunger,
            thirst: self.vitals.thirst,
            temperature: self.vitals.temperature,
            alive: self.alive,
            status: self.status(),
            received_food: self.received.food,
            received_water: self.received.water,
            received_medicine: self.received.medicine,
        }
    }
}

/// All crew members of the voyage.
#[derive(Debug, Clone, Default)]
pub struct CrewRoster {
    members: Vec<CrewMember>,
}

impl CrewRoster {
    pub fn from_presets(presets: &[CrewPreset]) -> Self {
        Self {
            members: presets.iter().map(CrewMember::from_preset).collect(),
        }
    }

    pub fn members(&self) -> &[CrewMember] {
        &self.members
    }

    pub fn get(&self, crew_id: CrewId) -> Option<&CrewMember> {
        self.members.iter().find(|m| m.id == crew_id)
    }

    pub(crate) fn get_mut(&mut self, crew_id: CrewId) -> Option<&mut CrewMember> {
        self.members.iter_mut().find(|m| m.id == crew_id)
    }

    /// Looks up a member that can still receive supplies.
    pub fn living(&self, crew_id: CrewId) -> Result<&CrewMember, CommandError> {
        let member = self.get(crew_id).ok_or(CommandError::UnknownCrew { crew_id })?;
        if !member.alive {
            return Err(CommandError::DeadCrewTarget { crew_id });
        }
        Ok(member)
    }

    pub fn total(&self) -> usize {
        self.members.len()
    }

    pub fn alive_count(&self) -> usize {
        self.members.iter().filter(|m| m.alive).count()
    }

    pub fn members_with_status(&self, status: CrewStatus) -> Vec<&CrewMember> {
        self.members.iter().filter(|m| m.status() == status).collect()
    }

    /// Applies one day of vital decay to every living member.
    ///
    /// Returns the ids of members who died during this pass.
    pub fn daily_deterioration<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<CrewId> {
        let mut died = Vec::new();
        for member in self.members.iter_mut() {
            if member.deteriorate(rng) {
                tracing::warn!("{} ({}) died", member.name, member.id);
                died.push(member.id);
            }
        }
        died
    }

    /// Applies `amount` units of `resource` to a crew member.
    ///
    /// Does not enforce the once-per-day rule; that belongs to allocation.
    pub fn apply_resource(
        &mut self,
        table: &ResourceTable,
        crew_id: CrewId,
        resource: ResourceType,
        amount: i32,
    ) -> Result<Vitals, CommandError> {
        let amount = positive_amount(amount)?;
        self.living(crew_id)?;
        let spec = table
            .get(resource)
            .ok_or(CommandError::UnknownResource { resource })?;
        if spec.category.vital().is_none() {
            return Err(CommandError::InvalidCategory {
                resource,
                category: spec.category,
            });
        }
        let member = self
            .get_mut(crew_id)
            .ok_or(CommandError::UnknownCrew { crew_id })?;
        Ok(member.receive(spec, amount))
    }

    /// Clears the received flags of every living member.
    pub fn reset_daily_flags(&mut self) {
        for member in self.members.iter_mut() {
            member.reset_daily_flags();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VoyageConfig;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn preset(id: u32, vitals: Vitals, decay: DecayRange) -> CrewPreset {
        CrewPreset::new(id, format!("Sailor {}", id), DecayRanges::uniform(decay))
            .with_vitals(vitals)
    }

    fn table() -> ResourceTable {
        VoyageConfig::default().resource_table()
    }

    #[test]
    fn test_status_thresholds() {
        let mut member =
            CrewMember::from_preset(&preset(1, Vitals::full(), DecayRange::fixed(0.0)));
        assert_eq!(member.status(), CrewStatus::Healthy);

        member.vitals.thirst = 49.0;
        assert_eq!(member.status(), CrewStatus::Poor);

        member.vitals.temperature = 19.5;
        assert_eq!(member.status(), CrewStatus::Critical);

        member.die();
        assert_eq!(member.status(), CrewStatus::Dead);
    }

    #[test]
    fn test_decay_stays_within_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        let range = DecayRange::new(4.0, 9.0);
        for _ in 0..200 {
            let value = range.sample(&mut rng);
            assert!((4.0..=9.0).contains(&value));
        }
        assert_eq!(DecayRange::fixed(3.0).sample(&mut rng), 3.0);
    }

    #[test]
    fn test_deterioration_subtracts_fixed_amounts() {
        let mut roster =
            CrewRoster::from_presets(&[preset(1, Vitals::full(), DecayRange::fixed(12.0))]);
        let mut rng = SmallRng::seed_from_u64(1);

        let died = roster.daily_deterioration(&mut rng);
        assert!(died.is_empty());
        assert_eq!(roster.members()[0].vitals(), Vitals::uniform(88.0));
    }

    #[test]
    fn test_death_pins_gauges_and_is_permanent() {
        let mut roster = CrewRoster::from_presets(&[preset(
            1,
            Vitals::new(5.0, 90.0, 90.0),
            DecayRange::new(10.0, 12.0),
        )]);
        let mut rng = SmallRng::seed_from_u64(3);

        let died = roster.daily_deterioration(&mut rng);
        assert_eq!(died, vec![CrewId(1)]);

        let member = &roster.members()[0];
        assert!(!member.is_alive());
        assert_eq!(member.vitals(), Vitals::zero());

        // Further decay does not report the death again
        assert!(roster.daily_deterioration(&mut rng).is_empty());

        let err = roster
            .apply_resource(&table(), CrewId(1), ResourceType::Fish, 1)
            .unwrap_err();
        assert_eq!(err, CommandError::DeadCrewTarget { crew_id: CrewId(1) });
        assert!(!roster.members()[0].is_alive());
        assert_eq!(roster.members()[0].vitals(), Vitals::zero());
    }

    #[test]
    fn test_apply_resource_clamps_and_marks_category() {
        let mut roster = CrewRoster::from_presets(&[preset(
            1,
            Vitals::new(90.0, 40.0, 60.0),
            DecayRange::fixed(0.0),
        )]);

        let gained = roster
            .apply_resource(&table(), CrewId(1), ResourceType::Fish, 1)
            .unwrap();
        assert_eq!(gained.hunger, 10.0);
        assert_eq!(gained.thirst, 0.0);

        let member = roster.get(CrewId(1)).unwrap();
        assert_eq!(member.vital(Vital::Hunger), 100.0);
        assert!(member.has_received(ResourceCategory::Food));
        assert!(!member.has_received(ResourceCategory::Water));
    }

    #[test]
    fn test_recovery_multiplier_scales_gain() {
        let mut roster = CrewRoster::from_presets(&[preset(
            1,
            Vitals::uniform(20.0),
            DecayRange::fixed(0.0),
        )
        .with_recovery(Vitals::new(1.0, 0.5, 1.0))]);

        let gained = roster
            .apply_resource(&table(), CrewId(1), ResourceType::FreshWater, 2)
            .unwrap();
        assert_eq!(gained.thirst, 30.0);
        assert_eq!(roster.get(CrewId(1)).unwrap().vital(Vital::Thirst), 50.0);
    }

    #[test]
    fn test_apply_resource_rejections() {
        let mut roster = CrewRoster::from_presets(&[preset(
            1,
            Vitals::uniform(50.0),
            DecayRange::fixed(0.0),
        )]);
        let table = table();

        assert_eq!(
            roster.apply_resource(&table, CrewId(1), ResourceType::Fish, 0),
            Err(CommandError::InvalidAmount { amount: 0 })
        );
        assert_eq!(
            roster.apply_resource(&table, CrewId(8), ResourceType::Fish, 1),
            Err(CommandError::UnknownCrew { crew_id: CrewId(8) })
        );
        assert!(matches!(
            roster.apply_resource(&table, CrewId(1), ResourceType::Plank, 1),
            Err(CommandError::InvalidCategory { .. })
        ));
        assert_eq!(
            roster.get(CrewId(1)).unwrap().vitals(),
            Vitals::uniform(50.0)
        );
        assert_eq!(
            roster.get(CrewId(1)).unwrap().received(),
            ReceivedFlags::default()
        );
    }

    #[test]
    fn test_reset_daily_flags() {
        let mut roster = CrewRoster::from_presets(&[preset(
            1,
            Vitals::uniform(50.0),
            DecayRange::fixed(0.0),
        )]);
        roster
            .apply_resource(&table(), CrewId(1), ResourceType::Medicine, 1)
            .unwrap();
        assert!(roster
            .get(CrewId(1))
            .unwrap()
            .has_received(ResourceCategory::Medicine));

        roster.reset_daily_flags();
        assert_eq!(
            roster.get(CrewId(1)).unwrap().received(),
            ReceivedFlags::default()
        );
    }

    #[test]
    fn test_counts_and_status_queries() {
        let mut roster = CrewRoster::from_presets(&[
            preset(1, Vitals::full(), DecayRange::fixed(0.0)),
            preset(2, Vitals::uniform(30.0), DecayRange::fixed(0.0)),
            preset(3, Vitals::uniform(5.0), DecayRange::fixed(10.0)),
        ]);
        let mut rng = SmallRng::seed_from_u64(0);
        roster.daily_deterioration(&mut rng);

        assert_eq!(roster.total(), 3);
        assert_eq!(roster.alive_count(), 2);
        assert_eq!(roster.members_with_status(CrewStatus::Healthy).len(), 1);
        assert_eq!(roster.members_with_status(CrewStatus::Poor).len(), 1);
        assert_eq!(
            roster.members_with_status(CrewStatus::Dead)[0].id(),
            CrewId(3)
        );
    }

    #[test]
    fn test_gauges_stay_bounded_over_many_days() {
        let config = VoyageConfig::default();
        let table = config.resource_table();
        let mut roster = CrewRoster::from_presets(&config.crew);
        let mut rng = SmallRng::seed_from_u64(99);

        for day in 0..30 {
            roster.reset_daily_flags();
            for preset in &config.crew {
                let resource = if day % 2 == 0 {
                    ResourceType::CannedFood
                } else {
                    ResourceType::FreshWater
                };
                let _ = roster.apply_resource(&table, preset.id, resource, 3);
            }
            roster.daily_deterioration(&mut rng);
            for member in roster.members() {
                for vital in Vital::all() {
                    let value = member.vital(vital);
                    assert!((VITAL_MIN..=VITAL_MAX).contains(&value));
                }
                if !member.is_alive() {
                    assert_eq!(member.vitals(), Vitals::zero());
                }
            }
        }
    }
}
