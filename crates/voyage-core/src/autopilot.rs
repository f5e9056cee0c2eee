//! Autopilot
//!
//! A headless player for the `voyage_sim` runner and the integration tests.
//! Each day it dives for a random haul, feeds the neediest crew, patches the
//! hull when it gets low and closes the day. It only ever goes through the
//! public `Voyage` commands.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use voyage_events::{GameOutcome, Phase, ResourceCategory, ResourceType};

use crate::allocation::AllocationRecord;
use crate::config::{HaulEntry, VoyageConfig};
use crate::error::CommandError;
use crate::phase::DayReport;
use crate::voyage::Voyage;

/// Keeps the haul stream independent of the decay stream for the same seed.
const HAUL_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Hull integrity below which the autopilot spends material.
pub const REPAIR_BELOW: f32 = 50.0;
const REPAIR_TARGET: f32 = 80.0;

/// Gauges at or above this are left alone to save supplies.
pub const FEED_BELOW: f32 = 75.0;

const FED_CATEGORIES: [ResourceCategory; 3] = [
    ResourceCategory::Food,
    ResourceCategory::Water,
    ResourceCategory::Medicine,
];

/// Everything the autopilot did during one day.
#[derive(Debug, Clone)]
pub struct DayLog {
    pub day: u32,
    pub haul: Vec<(ResourceType, u32)>,
    pub allocations: Vec<AllocationRecord>,
    pub repaired: f32,
    pub report: DayReport,
}

pub struct Autopilot {
    rng: SmallRng,
    haul: Vec<HaulEntry>,
}

impl Autopilot {
    pub fn new(config: &VoyageConfig) -> Self {
        Self::with_seed(config.dive.haul.clone(), config.voyage.seed)
    }

    pub fn with_seed(haul: Vec<HaulEntry>, seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed ^ HAUL_SEED_SALT),
            haul,
        }
    }

    /// Plays one full day. The voyage must be at Morning, or not yet started.
    pub fn play_day(&mut self, voyage: &mut Voyage) -> Result<DayLog, CommandError> {
        if voyage.current_phase() == Phase::None {
            voyage.start_day()?;
        }
        let day = voyage.current_day();

        voyage.request_phase_change(Phase::Diving)?;
        let haul = self.dive(voyage)?;

        voyage.request_phase_change(Phase::Evening)?;
        let allocations = distribute(voyage)?;
        let repaired = patch_hull(voyage)?;

        let report = voyage.complete_day()?;
        tracing::debug!(
            "day {}: hauled {} stacks, {} allocations, hull +{:.1}",
            day,
            haul.len(),
            allocations.len(),
            repaired
        );

        Ok(DayLog {
            day,
            haul,
            allocations,
            repaired,
            report,
        })
    }

    /// Plays until the voyage produces its outcome.
    pub fn run_to_end(&mut self, voyage: &mut Voyage) -> Result<GameOutcome, CommandError> {
        loop {
            let log = self.play_day(voyage)?;
            if let Some(outcome) = log.report.outcome {
                return Ok(outcome);
            }
        }
    }

    fn dive(&mut self, voyage: &mut Voyage) -> Result<Vec<(ResourceType, u32)>, CommandError> {
        let mut haul = Vec::new();
        for entry in &self.haul {
            let count = if entry.max <= entry.min {
                entry.min
            } else {
                self.rng.gen_range(entry.min..=entry.max)
            };
            if count == 0 {
                continue;
            }
            voyage.add_resource(entry.resource, i32::try_from(count).unwrap_or(i32::MAX))?;
            haul.push((entry.resource, count));
        }
        Ok(haul)
    }
}

/// One unit per fed category to each living member below `FEED_BELOW`,
/// lowest gauge first, while stock lasts.
fn distribute(voyage: &mut Voyage) -> Result<Vec<AllocationRecord>, CommandError> {
    let mut records = Vec::new();

    for category in FED_CATEGORIES {
        let Some(vital) = category.vital() else {
            continue;
        };
        let mut needy: Vec<_> = voyage
            .crew_members()
            .iter()
            .filter(|m| m.is_alive() && !m.has_received(category) && m.vital(vital) < FEED_BELOW)
            .map(|m| (m.id(), m.vital(vital)))
            .collect();
        needy.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

        for (crew_id, _) in needy {
            let stocked = voyage
                .resource_table()
                .of_category(category)
                .into_iter()
                .find(|r| voyage.resource_amount(*r) > 0);
            let Some(resource) = stocked else {
                break;
            };
            let receipt = voyage.assign(crew_id, resource, 1)?;
            records.push(receipt.record);
        }
    }
    Ok(records)
}

/// Spends material, configured repair material first, to lift the hull
/// back towards `REPAIR_TARGET` once it drops below `REPAIR_BELOW`.
fn patch_hull(voyage: &mut Voyage) -> Result<f32, CommandError> {
    if voyage.ship_integrity() >= REPAIR_BELOW {
        return Ok(0.0);
    }

    let preferred = voyage.repair_material();
    let mut materials = vec![preferred];
    materials.extend(
        voyage
            .resource_table()
            .of_category(ResourceCategory::Material)
            .into_iter()
            .filter(|m| *m != preferred),
    );

    let mut gained = 0.0;
    for material in materials {
        let missing = REPAIR_TARGET - voyage.ship_integrity();
        if missing <= 0.0 {
            break;
        }
        let ratio = voyage
            .resource_table()
            .get(material)
            .map(|spec| spec.hull_repair)
            .unwrap_or(0.0);
        if ratio <= 0.0 {
            continue;
        }
        let needed = (missing / ratio).ceil() as u32;
        let units = needed.min(voyage.resource_amount(material));
        if units == 0 {
            continue;
        }
        gained += voyage.repair_ship_with(material, i32::try_from(units).unwrap_or(i32::MAX))?;
    }
    Ok(gained)
}

#[cfg(test)]
mod tests {
    use super::*;
    use voyage_events::CrewId;

    #[test]
    fn test_play_day_runs_full_cycle() {
        let config = VoyageConfig::default();
        let mut voyage = Voyage::new(&config).unwrap();
        let mut pilot = Autopilot::new(&config);

        let log = pilot.play_day(&mut voyage).unwrap();
        assert_eq!(log.day, 1);
        assert_eq!(voyage.current_day(), 2);
        assert_eq!(voyage.current_phase(), Phase::Morning);
        assert_eq!(log.report.completed_day, 1);
    }

    #[test]
    fn test_neediest_member_is_fed_first() {
        let mut config = VoyageConfig::default();
        // One ration of water, two thirsty crew
        for spec in &mut config.resources {
            if spec.kind == ResourceType::FreshWater {
                spec.initial_stock = 1;
            }
        }
        config.crew[0].vitals.thirst = 40.0;
        config.crew[1].vitals.thirst = 20.0;
        config.dive.haul.clear();

        let mut voyage = Voyage::new(&config).unwrap();
        voyage.start_day().unwrap();
        voyage.request_phase_change(Phase::Diving).unwrap();
        voyage.request_phase_change(Phase::Evening).unwrap();

        let records = distribute(&mut voyage).unwrap();
        let water: Vec<_> = records
            .iter()
            .filter(|r| r.resource == ResourceType::FreshWater)
            .collect();
        assert_eq!(water.len(), 1);
        assert_eq!(water[0].crew_id, config.crew[1].id);
        assert!(!voyage
            .crew(CrewId(1))
            .unwrap()
            .has_received(ResourceCategory::Water));
    }

    #[test]
    fn test_hull_patched_below_threshold() {
        let mut config = VoyageConfig::default();
        config.hull.initial_integrity = 40.0;
        let mut voyage = Voyage::new(&config).unwrap();

        let repaired = patch_hull(&mut voyage).unwrap();
        assert_eq!(repaired, 10.0);
        assert_eq!(voyage.ship_integrity(), 50.0);
        assert_eq!(voyage.resource_amount(ResourceType::Plank), 0);
    }

    #[test]
    fn test_healthy_hull_left_alone() {
        let config = VoyageConfig::default();
        let mut voyage = Voyage::new(&config).unwrap();
        assert_eq!(patch_hull(&mut voyage).unwrap(), 0.0);
        assert_eq!(voyage.resource_amount(ResourceType::Plank), 10);
    }

    #[test]
    fn test_run_to_end_produces_outcome() {
        let config = VoyageConfig::default();
        let mut voyage = Voyage::new(&config).unwrap();
        let mut pilot = Autopilot::new(&config);

        let outcome = pilot.run_to_end(&mut voyage).unwrap();
        assert_eq!(voyage.outcome(), Some(&outcome));
        assert!(outcome.day() <= config.voyage.max_days);
        assert_eq!(
            pilot.play_day(&mut voyage).unwrap_err(),
            CommandError::GameOver
        );
    }
}
