//! TrainingSimulation - Train goals in order against a private copy of state

use crate::attributes::AttributeScratchpad;
use crate::character::CharacterState;
use crate::config::NewPlayerBonus;
use crate::plan::ResolvedGoal;
use crate::skill::{points, SkillCatalog};
use crate::training::rate::{hours_to_duration, TrainingRate};
use crate::types::{SkillIndex, ATTRIBUTE_COUNT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One completed level in a simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingStep {
    pub skill: SkillIndex,
    pub level: u8,
    /// Hours since the simulation started when this level began
    pub start_hours: f64,
    pub hours: f64,
    /// SP per hour used for this level, bonus included
    pub sp_per_hour: f64,
}

/// Simulated character progress
///
/// Owns its SP and attributes; the character it was seeded from is never
/// modified. Levels are trained one at a time so learning and attribute
/// skills speed up everything after them as soon as they complete.
#[derive(Debug, Clone)]
pub struct TrainingSimulation<'a> {
    catalog: &'a SkillCatalog,
    bonus: NewPlayerBonus,
    attributes: AttributeScratchpad,
    skill_points: Vec<u32>,
    total_sp: u64,
    elapsed_hours: f64,
    steps: Option<Vec<TrainingStep>>,
}

impl<'a> TrainingSimulation<'a> {
    /// Seed from a character, training under `attributes`
    ///
    /// Skill bonuses in `attributes` are recomputed from the character's
    /// levels, only bases and implants are taken as given.
    pub fn new(
        catalog: &'a SkillCatalog,
        character: &CharacterState,
        attributes: AttributeScratchpad,
        bonus: NewPlayerBonus,
    ) -> Self {
        let skill_points = catalog
            .iter()
            .map(|(index, _)| character.skill_points(index))
            .collect();
        let mut simulation = TrainingSimulation {
            catalog,
            bonus,
            attributes,
            skill_points,
            total_sp: character.total_skill_points(),
            elapsed_hours: 0.0,
            steps: None,
        };
        simulation.refresh_bonuses();
        simulation
    }

    /// Record a [`TrainingStep`] for every level trained
    pub fn with_step_log(mut self) -> Self {
        self.steps = Some(Vec::new());
        self
    }

    pub fn steps(&self) -> &[TrainingStep] {
        self.steps.as_deref().unwrap_or(&[])
    }

    pub fn attributes(&self) -> &AttributeScratchpad {
        &self.attributes
    }

    pub fn skill_points(&self, skill: SkillIndex) -> u32 {
        self.skill_points[skill.0]
    }

    /// Override one skill's SP, adjusting the character total
    pub fn set_skill_points(&mut self, skill: SkillIndex, skill_points: u32) {
        let previous = self.skill_points[skill.0];
        self.total_sp = self.total_sp - previous as u64 + skill_points as u64;
        self.skill_points[skill.0] = skill_points;
        if self.catalog.learning_map().affects_attributes(skill) {
            self.refresh_bonuses();
        }
    }

    pub fn level_of(&self, skill: SkillIndex) -> u8 {
        points::level_for_points(self.catalog.get(skill).rank, self.skill_points[skill.0])
    }

    pub fn total_skill_points(&self) -> u64 {
        self.total_sp
    }

    pub fn elapsed_hours(&self) -> f64 {
        self.elapsed_hours
    }

    pub fn elapsed(&self) -> Duration {
        hours_to_duration(self.elapsed_hours)
    }

    /// Rate for `skill` under the current simulated attributes, no bonus
    pub fn rate(&self, skill: SkillIndex) -> TrainingRate {
        let def = self.catalog.get(skill);
        TrainingRate::new(
            self.attributes.effective_value(def.primary),
            self.attributes.effective_value(def.secondary),
        )
    }

    /// Train `skill` up to `level`, ignoring prerequisites
    ///
    /// Returns the hours spent; zero if already there.
    pub fn train_to(&mut self, skill: SkillIndex, level: u8) -> f64 {
        let mut hours = 0.0;
        let rank = self.catalog.get(skill).rank;
        let affects_attributes = self.catalog.learning_map().affects_attributes(skill);

        for next in (self.level_of(skill) + 1)..=level {
            let target_sp = points::required_points(rank, next);
            let missing = target_sp.saturating_sub(self.skill_points[skill.0]) as u64;
            let rate = self.rate(skill);
            let step_hours = rate.hours_with_bonus(missing, self.total_sp, &self.bonus);

            if let Some(steps) = self.steps.as_mut() {
                steps.push(TrainingStep {
                    skill,
                    level: next,
                    start_hours: self.elapsed_hours,
                    hours: step_hours,
                    sp_per_hour: rate.per_hour_with_bonus(self.total_sp, &self.bonus),
                });
            }

            self.skill_points[skill.0] = target_sp;
            self.total_sp += missing;
            self.elapsed_hours += step_hours;
            hours += step_hours;

            if affects_attributes {
                self.refresh_bonuses();
            }
        }

        hours
    }

    /// Train unmet prerequisites in dependency order, then `skill` to `level`
    pub fn train_goal(&mut self, skill: SkillIndex, level: u8) -> f64 {
        let prerequisites = self
            .catalog
            .unmet_prerequisites(skill, |s| self.level_of(s));

        let mut hours = 0.0;
        for (prereq, prereq_level) in prerequisites {
            hours += self.train_to(prereq, prereq_level);
        }
        hours + self.train_to(skill, level)
    }

    /// Switch to new base values; implants and skill bonuses carry over
    pub fn remap(&mut self, bases: [i32; ATTRIBUTE_COUNT]) {
        self.attributes = self.attributes.with_bases(bases);
    }

    /// Apply the goal's remap point, if it has bases, then train it
    pub fn train_plan_goal(&mut self, goal: &ResolvedGoal) -> f64 {
        if let Some(bases) = goal.remap_bases() {
            self.remap(bases);
        }
        self.train_goal(goal.skill, goal.level)
    }

    fn refresh_bonuses(&mut self) {
        let catalog = self.catalog;
        let skill_points = &self.skill_points;
        self.attributes.apply_skill_bonuses(catalog.learning_map(), |s| {
            points::level_for_points(catalog.get(s).rank, skill_points[s.0])
        });
    }
}
