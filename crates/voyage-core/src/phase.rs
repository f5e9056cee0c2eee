//! Phase Controller
//!
//! Owns the day counter and the Morning -> Diving -> Evening cycle. The day
//! boundary runs the deterioration pipeline in a fixed order: crew decay,
//! hull decay, day increment, outcome evaluation.

use rand::Rng;
use voyage_events::{CrewId, GameOutcome, Phase};

use crate::crew::CrewRoster;
use crate::error::CommandError;
use crate::hull::ShipHull;
use crate::outcome::OutcomeEvaluator;

/// A phase change that actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: Phase,
    pub to: Phase,
}

/// What the day boundary did.
#[derive(Debug, Clone, PartialEq)]
pub struct DayReport {
    /// The day that just ended
    pub completed_day: u32,
    /// Crew members who died during decay, in roster order
    pub deaths: Vec<CrewId>,
    pub hull_before: f32,
    pub hull_after: f32,
    /// Set when the voyage ended on this boundary
    pub outcome: Option<GameOutcome>,
    pub transition: PhaseTransition,
}

impl DayReport {
    pub fn hull_delta(&self) -> f32 {
        self.hull_after - self.hull_before
    }

    pub fn ended_voyage(&self) -> bool {
        self.outcome.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct PhaseController {
    phase: Phase,
    day: u32,
    evaluator: OutcomeEvaluator,
    outcome: Option<GameOutcome>,
}

impl PhaseController {
    pub fn new(max_days: u32) -> Self {
        Self {
            phase: Phase::None,
            day: 1,
            evaluator: OutcomeEvaluator::new(max_days),
            outcome: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn max_days(&self) -> u32 {
        self.evaluator.max_days()
    }

    /// The terminal outcome, once produced. Never changes afterwards.
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    fn ensure_running(&self) -> Result<(), CommandError> {
        if self.is_over() {
            return Err(CommandError::GameOver);
        }
        Ok(())
    }

    fn enter(&mut self, to: Phase) -> PhaseTransition {
        let transition = PhaseTransition {
            from: self.phase,
            to,
        };
        self.phase = to;
        tracing::debug!("day {}: {} -> {}", self.day, transition.from, transition.to);
        transition
    }

    fn begin_morning(&mut self, roster: &mut CrewRoster) -> PhaseTransition {
        roster.reset_daily_flags();
        tracing::info!("day {} begins", self.day);
        self.enter(Phase::Morning)
    }

    /// Opens the first day. Only legal before the voyage has started.
    pub fn start_day(&mut self, roster: &mut CrewRoster) -> Result<PhaseTransition, CommandError> {
        self.ensure_running()?;
        if self.phase != Phase::None {
            return Err(CommandError::InvalidPhaseTransition {
                from: self.phase,
                to: Phase::Morning,
            });
        }
        Ok(self.begin_morning(roster))
    }

    /// Moves within a day: Morning -> Diving and Diving -> Evening.
    ///
    /// Entering Morning is a day boundary and goes through `start_day` or
    /// `complete_day`, so it is rejected here like any other illegal target.
    pub fn request_phase_change(&mut self, target: Phase) -> Result<PhaseTransition, CommandError> {
        self.ensure_running()?;
        let legal = matches!(
            (self.phase, target),
            (Phase::Morning, Phase::Diving) | (Phase::Diving, Phase::Evening)
        );
        if !legal {
            return Err(CommandError::InvalidPhaseTransition {
                from: self.phase,
                to: target,
            });
        }
        Ok(self.enter(target))
    }

    /// Closes the Evening: decays crew then hull, advances the day and
    /// evaluates the outcome. A terminal outcome freezes the controller in
    /// GameOver; otherwise the next Morning starts with cleared flags.
    pub fn complete_day<R: Rng + ?Sized>(
        &mut self,
        roster: &mut CrewRoster,
        hull: &mut ShipHull,
        rng: &mut R,
    ) -> Result<DayReport, CommandError> {
        self.ensure_running()?;
        if self.phase != Phase::Evening {
            return Err(CommandError::InvalidDayCompletion { phase: self.phase });
        }

        let completed_day = self.day;
        let deaths = roster.daily_deterioration(rng);
        let hull_before = hull.integrity();
        hull.daily_deterioration();
        let hull_after = hull.integrity();

        self.day += 1;
        let outcome = self.evaluator.evaluate(self.day, roster, hull);
        tracing::info!(
            "day {} complete: {} of {} crew alive, hull {:.1}",
            completed_day,
            roster.alive_count(),
            roster.total(),
            hull_after
        );

        let transition = match &outcome {
            Some(result) => {
                tracing::info!("voyage ended: {}", result);
                self.outcome = Some(result.clone());
                self.enter(Phase::GameOver)
            }
            None => self.begin_morning(roster),
        };

        Ok(DayReport {
            completed_day,
            deaths,
            hull_before,
            hull_after,
            outcome,
            transition,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrewPreset;
    use crate::crew::{DecayRange, DecayRanges, Vitals};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use voyage_events::OutcomeReason;

    fn roster(decay: f32) -> CrewRoster {
        CrewRoster::from_presets(&[
            CrewPreset::new(1, "Ilse", DecayRanges::uniform(DecayRange::fixed(decay))),
            CrewPreset::new(2, "Bram", DecayRanges::uniform(DecayRange::fixed(decay))),
        ])
    }

    fn to_evening(controller: &mut PhaseController) {
        controller.request_phase_change(Phase::Diving).unwrap();
        controller.request_phase_change(Phase::Evening).unwrap();
    }

    #[test]
    fn test_start_day_only_from_none() {
        let mut controller = PhaseController::new(5);
        let mut crew = roster(1.0);

        let transition = controller.start_day(&mut crew).unwrap();
        assert_eq!(
            transition,
            PhaseTransition {
                from: Phase::None,
                to: Phase::Morning
            }
        );
        assert_eq!(controller.day(), 1);

        assert!(matches!(
            controller.start_day(&mut crew),
            Err(CommandError::InvalidPhaseTransition {
                from: Phase::Morning,
                ..
            })
        ));
    }

    #[test]
    fn test_only_successor_is_legal() {
        let mut controller = PhaseController::new(5);
        let mut crew = roster(1.0);

        assert!(controller.request_phase_change(Phase::Diving).is_err());
        controller.start_day(&mut crew).unwrap();

        for target in [Phase::None, Phase::Morning, Phase::Evening, Phase::GameOver] {
            assert!(controller.request_phase_change(target).is_err());
            assert_eq!(controller.phase(), Phase::Morning);
        }
        controller.request_phase_change(Phase::Diving).unwrap();

        for target in [Phase::None, Phase::Morning, Phase::Diving, Phase::GameOver] {
            assert!(controller.request_phase_change(target).is_err());
            assert_eq!(controller.phase(), Phase::Diving);
        }
        controller.request_phase_change(Phase::Evening).unwrap();

        // Evening only leaves through complete_day
        assert!(controller.request_phase_change(Phase::Morning).is_err());
        assert_eq!(controller.phase(), Phase::Evening);
    }

    #[test]
    fn test_complete_day_outside_evening_is_rejected() {
        let mut controller = PhaseController::new(5);
        let mut crew = roster(10.0);
        let mut hull = ShipHull::new(100.0, 8.0);
        let mut rng = SmallRng::seed_from_u64(1);

        controller.start_day(&mut crew).unwrap();
        let err = controller.complete_day(&mut crew, &mut hull, &mut rng).unwrap_err();

        assert_eq!(
            err,
            CommandError::InvalidDayCompletion {
                phase: Phase::Morning
            }
        );
        assert_eq!(controller.day(), 1);
        assert_eq!(hull.integrity(), 100.0);
        assert_eq!(crew.get(CrewId(1)).unwrap().vitals(), Vitals::full());
    }

    #[test]
    fn test_complete_day_runs_pipeline_and_restarts_morning() {
        let mut controller = PhaseController::new(5);
        let mut crew = roster(10.0);
        let mut hull = ShipHull::new(100.0, 8.0);
        let mut rng = SmallRng::seed_from_u64(1);

        controller.start_day(&mut crew).unwrap();
        to_evening(&mut controller);
        let report = controller.complete_day(&mut crew, &mut hull, &mut rng).unwrap();

        assert_eq!(report.completed_day, 1);
        assert!(report.deaths.is_empty());
        assert_eq!(report.hull_delta(), -8.0);
        assert!(!report.ended_voyage());
        assert_eq!(
            report.transition,
            PhaseTransition {
                from: Phase::Evening,
                to: Phase::Morning
            }
        );
        assert_eq!(controller.day(), 2);
        assert_eq!(controller.phase(), Phase::Morning);
        assert_eq!(crew.get(CrewId(2)).unwrap().vitals(), Vitals::uniform(90.0));
    }

    #[test]
    fn test_day_limit_reached_freezes_controller() {
        let mut controller = PhaseController::new(2);
        let mut crew = roster(1.0);
        let mut hull = ShipHull::new(100.0, 8.0);
        let mut rng = SmallRng::seed_from_u64(1);

        controller.start_day(&mut crew).unwrap();
        to_evening(&mut controller);
        let report = controller.complete_day(&mut crew, &mut hull, &mut rng).unwrap();

        let outcome = report.outcome.unwrap();
        assert_eq!(outcome.reason(), OutcomeReason::Victory);
        assert_eq!(outcome.day(), 2);
        assert_eq!(controller.day(), 2);
        assert_eq!(controller.phase(), Phase::GameOver);
        assert_eq!(controller.outcome(), Some(&outcome));

        assert_eq!(
            controller.request_phase_change(Phase::Morning),
            Err(CommandError::GameOver)
        );
        assert_eq!(controller.start_day(&mut crew), Err(CommandError::GameOver));
        assert_eq!(
            controller.complete_day(&mut crew, &mut hull, &mut rng),
            Err(CommandError::GameOver)
        );
    }

    #[test]
    fn test_all_crew_dead_reports_deaths() {
        let mut controller = PhaseController::new(5);
        let mut crew = roster(150.0);
        let mut hull = ShipHull::new(100.0, 8.0);
        let mut rng = SmallRng::seed_from_u64(1);

        controller.start_day(&mut crew).unwrap();
        to_evening(&mut controller);
        let report = controller.complete_day(&mut crew, &mut hull, &mut rng).unwrap();

        assert_eq!(report.deaths, vec![CrewId(1), CrewId(2)]);
        assert_eq!(report.outcome.unwrap().reason(), OutcomeReason::AllCrewDead);
    }
}
