//! Scenario tests
//!
//! End-to-end checks of the survival economy through the public `Voyage`
//! commands.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use voyage_core::{
    CommandError, CrewPreset, CrewRoster, DecayRange, DecayRanges, Vitals, Voyage, VoyageConfig,
};
use voyage_events::{CrewId, EventKind, OutcomeReason, Phase, ResourceCategory, ResourceType, Vital};

fn with_stock(mut config: VoyageConfig, resource: ResourceType, stock: u32) -> VoyageConfig {
    for spec in &mut config.resources {
        if spec.kind == resource {
            spec.initial_stock = stock;
        }
    }
    config
}

fn evening(config: &VoyageConfig) -> Voyage {
    let mut voyage = Voyage::new(config).unwrap();
    voyage.start_day().unwrap();
    voyage.request_phase_change(Phase::Diving).unwrap();
    voyage.request_phase_change(Phase::Evening).unwrap();
    voyage
}

#[test]
fn test_scenario_a_successful_allocation() {
    let config = with_stock(VoyageConfig::default(), ResourceType::Fish, 2);
    let mut voyage = evening(&config);
    let hunger_before = voyage.crew(CrewId(1)).unwrap().vital(Vital::Hunger);

    voyage.assign(CrewId(1), ResourceType::Fish, 1).unwrap();

    let member = voyage.crew(CrewId(1)).unwrap();
    assert_eq!(voyage.resource_amount(ResourceType::Fish), 1);
    assert_eq!(
        member.vital(Vital::Hunger),
        (hunger_before + 25.0).min(100.0)
    );
    assert!(member.has_received(ResourceCategory::Food));
}

#[test]
fn test_scenario_b_duplicate_same_day_rejection() {
    let config = with_stock(VoyageConfig::default(), ResourceType::Fish, 2);
    let mut voyage = evening(&config);
    voyage.assign(CrewId(1), ResourceType::Fish, 1).unwrap();
    let vitals_after_a = voyage.crew(CrewId(1)).unwrap().vitals();
    let canned_after_a = voyage.resource_amount(ResourceType::CannedFood);

    let err = voyage.assign(CrewId(1), ResourceType::CannedFood, 1).unwrap_err();

    assert_eq!(
        err,
        CommandError::AlreadyReceivedToday {
            crew_id: CrewId(1),
            category: ResourceCategory::Food,
        }
    );
    assert_eq!(voyage.resource_amount(ResourceType::Fish), 1);
    assert_eq!(
        voyage.resource_amount(ResourceType::CannedFood),
        canned_after_a
    );
    assert_eq!(voyage.crew(CrewId(1)).unwrap().vitals(), vitals_after_a);
}

#[test]
fn test_scenario_c_insufficient_stock() {
    let config = with_stock(VoyageConfig::default(), ResourceType::FreshWater, 0);
    let mut voyage = evening(&config);
    let before = voyage.crew(CrewId(3)).unwrap().vitals();

    let err = voyage.assign(CrewId(3), ResourceType::FreshWater, 1).unwrap_err();

    assert!(matches!(
        err,
        CommandError::InsufficientResource {
            requested: 1,
            available: 0,
            ..
        }
    ));
    assert_eq!(voyage.resource_amount(ResourceType::FreshWater), 0);
    let member = voyage.crew(CrewId(3)).unwrap();
    assert_eq!(member.vitals(), before);
    assert!(!member.has_received(ResourceCategory::Water));
}

#[test]
fn test_scenario_d_death_by_decay() {
    let decay = DecayRanges::new(
        DecayRange::new(10.0, 12.0),
        DecayRange::fixed(1.0),
        DecayRange::fixed(1.0),
    );
    let mut roster = CrewRoster::from_presets(&[CrewPreset::new(1, "Ilse", decay)
        .with_vitals(Vitals::new(5.0, 80.0, 80.0))]);
    let mut rng = SmallRng::seed_from_u64(7);

    let deaths = roster.daily_deterioration(&mut rng);

    let member = roster.get(CrewId(1)).unwrap();
    assert_eq!(deaths, vec![CrewId(1)]);
    assert!(!member.is_alive());
    assert_eq!(member.vitals(), Vitals::zero());
}

#[test]
fn test_scenario_d_death_reported_through_voyage() {
    let mut config = VoyageConfig::default();
    config.crew[0].vitals.hunger = 5.0;
    config.crew[0].decay.hunger = DecayRange::new(10.0, 12.0);
    let mut voyage = evening(&config);
    voyage.drain_events();

    let report = voyage.complete_day().unwrap();

    assert_eq!(report.deaths, vec![CrewId(1)]);
    assert!(voyage
        .drain_events()
        .iter()
        .any(|e| matches!(&e.kind, EventKind::CrewDied { crew_id, .. } if *crew_id == CrewId(1))));
    assert_eq!(
        voyage.assign(CrewId(1), ResourceType::Fish, 1),
        Err(CommandError::ActionOutsidePhase {
            action: "distributing supplies",
            phase: Phase::Morning
        })
    );
}

#[test]
fn test_scenario_e_victory() {
    let mut config = VoyageConfig::default();
    config.voyage.max_days = 3;
    let mut voyage = evening(&config);
    voyage.complete_day().unwrap();
    voyage.request_phase_change(Phase::Diving).unwrap();
    voyage.request_phase_change(Phase::Evening).unwrap();
    assert_eq!(voyage.current_day(), 2);

    let report = voyage.complete_day().unwrap();

    assert_eq!(voyage.current_day(), 3);
    let outcome = report.outcome.unwrap();
    assert!(outcome.is_victory());
    assert_eq!(outcome.reason(), OutcomeReason::Victory);
    assert_eq!(outcome.survived_crew(), 4);
    assert_eq!(outcome.total_crew(), 4);
    assert_eq!(outcome.ship_integrity(), 84.0);
    assert_eq!(voyage.outcome(), Some(&outcome));
}

#[test]
fn test_scenario_f_illegal_transition() {
    let mut voyage = Voyage::new(&VoyageConfig::default()).unwrap();
    voyage.start_day().unwrap();

    let err = voyage.request_phase_change(Phase::Evening).unwrap_err();

    assert_eq!(
        err,
        CommandError::InvalidPhaseTransition {
            from: Phase::Morning,
            to: Phase::Evening,
        }
    );
    assert_eq!(voyage.current_phase(), Phase::Morning);
}

#[test]
fn test_ship_destroyed_defeat() {
    let mut config = VoyageConfig::default();
    config.hull.initial_integrity = 5.0;
    let mut voyage = evening(&config);

    let outcome = voyage.complete_day().unwrap().outcome.unwrap();

    assert_eq!(outcome.reason(), OutcomeReason::ShipDestroyed);
    assert!(!outcome.is_victory());
    assert!(!voyage.is_seaworthy());
    assert_eq!(voyage.current_phase(), Phase::GameOver);
}

#[test]
fn test_repair_keeps_ship_afloat() {
    let mut config = VoyageConfig::default();
    config.hull.initial_integrity = 5.0;
    let mut voyage = evening(&config);

    voyage.repair_ship(4).unwrap();
    let report = voyage.complete_day().unwrap();

    assert!(report.outcome.is_none());
    assert_eq!(voyage.ship_integrity(), 1.0);
    assert_eq!(voyage.resource_amount(ResourceType::Plank), 6);
}

#[test]
fn test_material_cannot_feed_crew() {
    let mut voyage = evening(&VoyageConfig::default());
    let err = voyage.assign(CrewId(2), ResourceType::Plank, 1).unwrap_err();
    assert_eq!(
        err,
        CommandError::InvalidCategory {
            resource: ResourceType::Plank,
            category: ResourceCategory::Material,
        }
    );
}

#[test]
fn test_flags_reset_next_morning() {
    let mut voyage = evening(&VoyageConfig::default());
    voyage.assign(CrewId(4), ResourceType::Medicine, 1).unwrap();
    voyage.complete_day().unwrap();

    assert!(!voyage
        .crew(CrewId(4))
        .unwrap()
        .has_received(ResourceCategory::Medicine));
    voyage.request_phase_change(Phase::Diving).unwrap();
    voyage.request_phase_change(Phase::Evening).unwrap();
    voyage.assign(CrewId(4), ResourceType::Medicine, 1).unwrap();
    assert_eq!(voyage.resource_amount(ResourceType::Medicine), 0);
}
