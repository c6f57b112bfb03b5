//! TrainingTimeCalculator - Durations for skills and plans

use crate::attributes::AttributeScratchpad;
use crate::character::CharacterState;
use crate::config::TrainingConstants;
use crate::plan::ResolvedPlan;
use crate::skill::SkillCatalog;
use crate::training::rate::{self, hours_to_duration, TrainingRate};
use crate::training::simulation::{TrainingSimulation, TrainingStep};
use crate::types::SkillIndex;
use std::time::Duration;

/// Converts SP into time for a given catalog and rule set
///
/// Holds only read-only references; any number of calculators may share a
/// catalog.
#[derive(Debug, Clone, Copy)]
pub struct TrainingTimeCalculator<'a> {
    catalog: &'a SkillCatalog,
    constants: &'a TrainingConstants,
}

impl<'a> TrainingTimeCalculator<'a> {
    pub fn new(catalog: &'a SkillCatalog, constants: &'a TrainingConstants) -> Self {
        TrainingTimeCalculator { catalog, constants }
    }

    pub fn catalog(&self) -> &'a SkillCatalog {
        self.catalog
    }

    pub fn constants(&self) -> &'a TrainingConstants {
        self.constants
    }

    /// Base SP per hour for `skill` under `attributes`
    pub fn sp_per_hour(&self, skill: SkillIndex, attributes: &AttributeScratchpad) -> f64 {
        self.rate(skill, attributes).per_hour()
    }

    /// SP per hour including the new player bonus at `total_sp`
    pub fn sp_per_hour_at(
        &self,
        skill: SkillIndex,
        attributes: &AttributeScratchpad,
        total_sp: u64,
    ) -> f64 {
        self.rate(skill, attributes)
            .per_hour_with_bonus(total_sp, &self.constants.new_player_bonus)
    }

    /// Time to train `points` of `skill` at the base rate
    pub fn time_for_points(
        &self,
        skill: SkillIndex,
        points: i64,
        attributes: &AttributeScratchpad,
    ) -> Duration {
        let def = self.catalog.get(skill);
        rate::time_for_points(
            points,
            attributes.effective_value(def.primary),
            attributes.effective_value(def.secondary),
        )
    }

    /// Time for `character` to reach `target_level` of `skill`
    ///
    /// Unmet prerequisites are trained first, in dependency order. The new
    /// player bonus and any learning skills met on the way are accounted for.
    pub fn time_to_level(
        &self,
        character: &CharacterState,
        skill: SkillIndex,
        target_level: u8,
        attributes: &AttributeScratchpad,
    ) -> Duration {
        let mut simulation = self.simulation(character, attributes);
        hours_to_duration(simulation.train_goal(skill, target_level))
    }

    /// Like [`time_to_level`](Self::time_to_level), starting `skill` from `current_sp`
    pub fn time_to_level_from(
        &self,
        character: &CharacterState,
        skill: SkillIndex,
        current_sp: u32,
        target_level: u8,
        attributes: &AttributeScratchpad,
    ) -> Duration {
        let mut simulation = self.simulation(character, attributes);
        simulation.set_skill_points(skill, current_sp);
        hours_to_duration(simulation.train_goal(skill, target_level))
    }

    /// Time to train `level` of `skill` alone, counting SP already into it
    ///
    /// Prerequisites and lower levels are not included.
    pub fn time_for_level_only(
        &self,
        character: &CharacterState,
        skill: SkillIndex,
        level: u8,
        attributes: &AttributeScratchpad,
    ) -> Duration {
        let level = level.min(crate::skill::MAX_LEVEL);
        let points = character.record(skill).left_points_for_level_only(level);
        self.time_for_points(skill, points as i64, attributes)
    }

    /// Time to the next level of `skill`, zero at level 5
    pub fn time_to_next_level(
        &self,
        character: &CharacterState,
        skill: SkillIndex,
        attributes: &AttributeScratchpad,
    ) -> Duration {
        let level = character.skill_level(skill);
        if level >= crate::skill::MAX_LEVEL {
            return Duration::ZERO;
        }
        self.time_to_level(character, skill, level + 1, attributes)
    }

    /// Total time to train every goal of `plan`, in order
    pub fn plan_duration(
        &self,
        character: &CharacterState,
        plan: &ResolvedPlan,
        attributes: &AttributeScratchpad,
    ) -> Duration {
        hours_to_duration(self.plan_hours(character, plan, attributes))
    }

    /// Per-level breakdown of a plan
    pub fn plan_breakdown(
        &self,
        character: &CharacterState,
        plan: &ResolvedPlan,
        attributes: &AttributeScratchpad,
    ) -> Vec<TrainingStep> {
        let mut simulation = self.simulation(character, attributes).with_step_log();
        for goal in &plan.goals {
            simulation.train_plan_goal(goal);
        }
        simulation.steps().to_vec()
    }

    pub(crate) fn plan_hours(
        &self,
        character: &CharacterState,
        plan: &ResolvedPlan,
        attributes: &AttributeScratchpad,
    ) -> f64 {
        let mut simulation = self.simulation(character, attributes);
        plan.goals
            .iter()
            .map(|goal| simulation.train_plan_goal(goal))
            .sum()
    }

    /// Start time of each goal, in hours, under `attributes`
    pub(crate) fn goal_start_hours(
        &self,
        character: &CharacterState,
        plan: &ResolvedPlan,
        attributes: &AttributeScratchpad,
    ) -> Vec<f64> {
        let mut simulation = self.simulation(character, attributes);
        plan.goals
            .iter()
            .map(|goal| {
                let start = simulation.elapsed_hours();
                simulation.train_plan_goal(goal);
                start
            })
            .collect()
    }

    /// Elapsed hours and simulated attributes just before goal `index`
    ///
    /// The goal's own remap point is not applied yet.
    pub(crate) fn state_before(
        &self,
        character: &CharacterState,
        plan: &ResolvedPlan,
        attributes: &AttributeScratchpad,
        index: usize,
    ) -> (f64, AttributeScratchpad) {
        let mut simulation = self.simulation(character, attributes);
        for goal in plan.goals.iter().take(index) {
            simulation.train_plan_goal(goal);
        }
        (simulation.elapsed_hours(), simulation.attributes().clone())
    }

    fn simulation(
        &self,
        character: &CharacterState,
        attributes: &AttributeScratchpad,
    ) -> TrainingSimulation<'a> {
        TrainingSimulation::new(
            self.catalog,
            character,
            attributes.clone(),
            self.constants.new_player_bonus,
        )
    }

    fn rate(&self, skill: SkillIndex, attributes: &AttributeScratchpad) -> TrainingRate {
        let def = self.catalog.get(skill);
        TrainingRate::new(
            attributes.effective_value(def.primary),
            attributes.effective_value(def.secondary),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NewPlayerBonus;
    use crate::plan::{RemapPoint, TrainingPlan};
    use crate::skill::SkillDefinition;
    use crate::types::Attribute::*;

    fn catalog() -> SkillCatalog {
        SkillCatalog::new(vec![
            SkillDefinition::new("a", "Skill A", 1, Perception, Willpower),
            SkillDefinition::new("b", "Skill B", 1, Perception, Willpower).requires("a", 3),
            SkillDefinition::new("c", "Skill C", 2, Intelligence, Memory),
        ])
        .unwrap()
    }

    fn constants() -> TrainingConstants {
        TrainingConstants {
            new_player_bonus: NewPlayerBonus::disabled(),
            ..TrainingConstants::default()
        }
    }

    fn pilot(catalog: &SkillCatalog) -> CharacterState {
        // PER 20, WIL 10 -> 1500 SP/h on A and B
        CharacterState::new("Pilot", catalog, [20, 20, 10, 17, 20])
    }

    #[test]
    fn test_sp_per_hour() {
        let catalog = catalog();
        let constants = constants();
        let calc = TrainingTimeCalculator::new(&catalog, &constants);
        let state = pilot(&catalog);
        let pad = state.scratchpad(&catalog);

        assert!((calc.sp_per_hour(SkillIndex(0), &pad) - 1500.0).abs() < 1e-9);
        // INT 20 + MEM 20 / 2 = 30/min
        assert!((calc.sp_per_hour(SkillIndex(2), &pad) - 1800.0).abs() < 1e-9);
    }

    #[test]
    fn test_sp_per_hour_with_new_player_bonus() {
        let catalog = catalog();
        let constants = TrainingConstants::default();
        let calc = TrainingTimeCalculator::new(&catalog, &constants);
        let state = pilot(&catalog);
        let pad = state.scratchpad(&catalog);

        assert!((calc.sp_per_hour_at(SkillIndex(0), &pad, 0) - 3000.0).abs() < 1e-9);
        assert!((calc.sp_per_hour_at(SkillIndex(0), &pad, 1_599_999) - 3000.0).abs() < 1e-9);
        assert!((calc.sp_per_hour_at(SkillIndex(0), &pad, 1_600_000) - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_time_for_level_only() {
        let catalog = catalog();
        let constants = constants();
        let calc = TrainingTimeCalculator::new(&catalog, &constants);
        let mut state = pilot(&catalog);
        // Halfway through level 3: 1415 + 3292 of 6585
        state.set_skill(SkillIndex(0), 4707, 2);
        let pad = state.scratchpad(&catalog);

        let time = calc.time_for_level_only(&state, SkillIndex(0), 3, &pad);
        assert!((time.as_secs_f64() - 3293.0 / 1500.0 * 3600.0).abs() < 1e-6);
        // Level 4 alone: 45255 - 8000
        let time = calc.time_for_level_only(&state, SkillIndex(0), 4, &pad);
        assert!((time.as_secs_f64() - 37255.0 / 1500.0 * 3600.0).abs() < 1e-6);
        // Already trained
        assert_eq!(calc.time_for_level_only(&state, SkillIndex(0), 2, &pad), Duration::ZERO);
    }

    #[test]
    fn test_plan_applies_remap_points() {
        let catalog = catalog();
        let constants = constants();
        let calc = TrainingTimeCalculator::new(&catalog, &constants);
        let state = pilot(&catalog);
        let pad = state.scratchpad(&catalog);

        let mut plan = TrainingPlan::new();
        plan.push("c", 1).unwrap();
        plan.push_with_remap("a", 1, RemapPoint::with_bases([17, 27, 21, 17, 17]))
            .unwrap();
        let resolved = plan.resolve(&catalog).unwrap();

        let steps = calc.plan_breakdown(&state, &resolved, &pad);
        assert!((steps[1].sp_per_hour - 2250.0).abs() < 1e-9);

        let (start, attributes) = calc.state_before(&state, &resolved, &pad, 1);
        assert!((start - steps[1].start_hours).abs() < 1e-12);
        assert_eq!(attributes.bases(), [20, 20, 10, 17, 20]);
    }

    #[test]
    fn test_level_one_in_ten_minutes() {
        let catalog = catalog();
        let constants = constants();
        let calc = TrainingTimeCalculator::new(&catalog, &constants);
        let state = pilot(&catalog);
        let pad = state.scratchpad(&catalog);

        let time = calc.time_to_level(&state, SkillIndex(0), 1, &pad);
        assert!((time.as_secs_f64() - 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_prerequisite_time_included() {
        let catalog = catalog();
        let constants = constants();
        let calc = TrainingTimeCalculator::new(&catalog, &constants);
        let mut state = pilot(&catalog);
        state.set_skill(SkillIndex(0), 1415, 2);
        let pad = state.scratchpad(&catalog);

        let time_b = calc.time_to_level(&state, SkillIndex(1), 1, &pad);
        let time_a = calc.time_to_level(&state, SkillIndex(0), 3, &pad);
        let own = calc.time_for_points(SkillIndex(1), 250, &pad);
        let diff = time_b.as_secs_f64() - (time_a + own).as_secs_f64();
        assert!(diff.abs() < 1e-6);
    }

    #[test]
    fn test_time_to_level_from_overrides_sp() {
        let catalog = catalog();
        let constants = constants();
        let calc = TrainingTimeCalculator::new(&catalog, &constants);
        let state = pilot(&catalog);
        let pad = state.scratchpad(&catalog);

        let time = calc.time_to_level_from(&state, SkillIndex(0), 125, 1, &pad);
        assert!((time.as_secs_f64() - 300.0).abs() < 1e-6);
        let done = calc.time_to_level_from(&state, SkillIndex(0), 8000, 3, &pad);
        assert_eq!(done, Duration::ZERO);
    }

    #[test]
    fn test_time_to_next_level_at_max() {
        let catalog = catalog();
        let constants = constants();
        let calc = TrainingTimeCalculator::new(&catalog, &constants);
        let mut state = pilot(&catalog);
        state.set_skill(SkillIndex(0), 256_000, 5);
        let pad = state.scratchpad(&catalog);
        assert_eq!(calc.time_to_next_level(&state, SkillIndex(0), &pad), Duration::ZERO);
    }

    #[test]
    fn test_plan_order_shares_sp() {
        let catalog = catalog();
        let constants = constants();
        let calc = TrainingTimeCalculator::new(&catalog, &constants);
        let state = pilot(&catalog);
        let pad = state.scratchpad(&catalog);

        let mut plan = TrainingPlan::new();
        plan.push("a", 2).unwrap();
        plan.push("a", 3).unwrap();
        let resolved = plan.resolve(&catalog).unwrap();

        // Second goal starts where the first ended: 8000 SP total
        let hours = duration_hours(calc.plan_duration(&state, &resolved, &pad));
        assert!((hours - 8000.0 / 1500.0).abs() < 1e-6);

        let steps = calc.plan_breakdown(&state, &resolved, &pad);
        assert_eq!(steps.len(), 3);
        assert!((steps[2].start_hours - 1415.0 / 1500.0).abs() < 1e-9);
    }

    fn duration_hours(duration: Duration) -> f64 {
        rate::duration_to_hours(duration)
    }
}
