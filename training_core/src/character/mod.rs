//! CharacterState - A character's attributes and skill records

mod snapshot;

pub use snapshot::{AttributeSet, CharacterSnapshot, SkillSnapshot, TrainingSnapshot};

use crate::attributes::AttributeScratchpad;
use crate::skill::{ActiveTraining, SkillCatalog, SkillRecord};
use crate::types::{Attribute, SkillIndex, ATTRIBUTE_COUNT};
use chrono::{DateTime, Utc};

/// Live character state, aligned with one [`SkillCatalog`]
///
/// The calculator and optimizer only ever read this; every search works on
/// clones of the scratchpad it hands out.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterState {
    pub name: String,
    /// Base and implant values; skill bonuses are derived on demand
    attributes: AttributeScratchpad,
    /// One record per catalog skill, by index
    skills: Vec<SkillRecord>,
}

impl CharacterState {
    /// A character with no skills trained
    pub fn new(name: impl Into<String>, catalog: &SkillCatalog, bases: [i32; ATTRIBUTE_COUNT]) -> Self {
        CharacterState {
            name: name.into(),
            attributes: AttributeScratchpad::new(bases),
            skills: catalog
                .iter()
                .map(|(_, def)| SkillRecord::untrained(def.rank))
                .collect(),
        }
    }

    /// Import a snapshot
    ///
    /// Skills the catalog does not know are skipped with a warning.
    pub fn from_snapshot(catalog: &SkillCatalog, snapshot: &CharacterSnapshot) -> Self {
        let mut state = CharacterState::new(
            snapshot.name.clone(),
            catalog,
            snapshot.attributes.to_array(),
        );
        for (attr, bonus) in Attribute::all().iter().zip(snapshot.implants.to_array()) {
            state.attributes.set_implant_bonus(*attr, bonus);
        }

        for skill in &snapshot.skills {
            match catalog.index_of(&skill.skill) {
                Some(index) => state.set_skill(index, skill.skill_points, skill.level),
                None => tracing::warn!(
                    "Character {} knows unknown skill {}, skipping",
                    snapshot.name,
                    skill.skill
                ),
            }
        }

        if let Some(training) = &snapshot.training {
            match catalog.index_of(&training.skill) {
                Some(index) => state.start_training(
                    index,
                    ActiveTraining {
                        target_level: training.target_level,
                        start_sp: training.start_sp,
                        end_sp: training.end_sp,
                        start_time: training.start_time,
                        end_time: training.end_time,
                    },
                ),
                None => tracing::warn!(
                    "Character {} is training unknown skill {}, ignoring",
                    snapshot.name,
                    training.skill
                ),
            }
        }

        state
    }

    pub fn record(&self, skill: SkillIndex) -> &SkillRecord {
        &self.skills[skill.0]
    }

    /// Replace a skill's progress from raw imported values
    pub fn set_skill(&mut self, skill: SkillIndex, skill_points: i64, confirmed_level: i64) {
        let rank = self.skills[skill.0].rank();
        self.skills[skill.0] = SkillRecord::from_snapshot(rank, skill_points, confirmed_level);
    }

    /// Mark `skill` as the one in training; any other training stops
    pub fn start_training(&mut self, skill: SkillIndex, training: ActiveTraining) {
        for record in &mut self.skills {
            record.clear_training();
        }
        self.skills[skill.0].set_training(training);
    }

    /// Skill currently in training, if any
    pub fn training_skill(&self) -> Option<SkillIndex> {
        self.skills
            .iter()
            .position(SkillRecord::is_training)
            .map(SkillIndex)
    }

    pub fn skill_level(&self, skill: SkillIndex) -> u8 {
        self.skills[skill.0].effective_level()
    }

    pub fn skill_points(&self, skill: SkillIndex) -> u32 {
        self.skills[skill.0].skill_points()
    }

    /// Number of skills whose effective level is exactly `level`
    pub fn skill_count_at_level(&self, level: u8) -> usize {
        self.skills
            .iter()
            .filter(|r| r.effective_level() == level)
            .count()
    }

    /// SP summed over every skill
    pub fn total_skill_points(&self) -> u64 {
        self.skills.iter().map(|r| r.skill_points() as u64).sum()
    }

    pub fn set_implant_bonus(&mut self, attribute: Attribute, bonus: i32) {
        self.attributes.set_implant_bonus(attribute, bonus);
    }

    /// Base attribute values in `Attribute::all()` order
    pub fn base_attributes(&self) -> [i32; ATTRIBUTE_COUNT] {
        self.attributes.bases()
    }

    /// Fresh scratchpad with learning and attribute skill bonuses applied
    pub fn scratchpad(&self, catalog: &SkillCatalog) -> AttributeScratchpad {
        let mut pad = self.attributes.clone();
        pad.apply_skill_bonuses(catalog.learning_map(), |s| self.skill_level(s));
        pad
    }

    /// Copy with every training estimate frozen at `now`
    pub fn advanced_to(&self, now: DateTime<Utc>) -> Self {
        CharacterState {
            name: self.name.clone(),
            attributes: self.attributes.clone(),
            skills: self.skills.iter().map(|r| r.advanced_to(now)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::{SkillBonus, SkillDefinition};
    use crate::types::Attribute::*;
    use chrono::{Duration, TimeZone};

    fn catalog() -> SkillCatalog {
        SkillCatalog::new(vec![
            SkillDefinition::new("learning", "Learning", 1, Memory, Intelligence)
                .with_bonus(SkillBonus::Learning),
            SkillDefinition::new("instant_recall", "Instant Recall", 3, Memory, Intelligence)
                .with_bonus(SkillBonus::Attribute(Memory)),
            SkillDefinition::new("gunnery", "Gunnery", 1, Perception, Willpower),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_character_is_untrained() {
        let catalog = catalog();
        let state = CharacterState::new("Pilot", &catalog, [20; 5]);
        assert_eq!(state.total_skill_points(), 0);
        assert_eq!(state.skill_level(SkillIndex(2)), 0);
        assert!(state.training_skill().is_none());
    }

    #[test]
    fn test_skill_count_at_level() {
        let catalog = catalog();
        let mut state = CharacterState::new("Pilot", &catalog, [20; 5]);
        state.set_skill(SkillIndex(0), 8000, 3);
        state.set_skill(SkillIndex(2), 9000, 3);

        assert_eq!(state.skill_count_at_level(3), 2);
        assert_eq!(state.skill_count_at_level(0), 1);
        assert_eq!(state.skill_count_at_level(5), 0);
    }

    #[test]
    fn test_scratchpad_includes_skill_bonuses() {
        let catalog = catalog();
        let mut state = CharacterState::new("Pilot", &catalog, [20; 5]);
        state.set_skill(SkillIndex(0), 45255, 4);
        state.set_skill(SkillIndex(1), 750 * 8000 / 250, 3);
        state.set_implant_bonus(Memory, 3);

        let pad = state.scratchpad(&catalog);
        assert_eq!(pad.learning_level(), 4);
        assert_eq!(pad.value(Memory).skill_bonus, 3);
        assert!((pad.effective_value(Memory) - 26.0 * 1.08).abs() < 1e-9);
        assert!((pad.effective_value(Perception) - 20.0 * 1.08).abs() < 1e-9);
    }

    #[test]
    fn test_from_snapshot_skips_unknown() {
        let catalog = catalog();
        let snapshot = CharacterSnapshot {
            name: "Pilot".to_string(),
            attributes: AttributeSet::from_array([20, 21, 22, 23, 24]),
            implants: AttributeSet::default(),
            skills: vec![
                SkillSnapshot {
                    skill: "gunnery".into(),
                    skill_points: 8000,
                    level: 3,
                },
                SkillSnapshot {
                    skill: "retired_skill".into(),
                    skill_points: 500,
                    level: 1,
                },
            ],
            training: None,
        };

        let state = CharacterState::from_snapshot(&catalog, &snapshot);
        assert_eq!(state.base_attributes(), [20, 21, 22, 23, 24]);
        assert_eq!(state.skill_level(SkillIndex(2)), 3);
        assert_eq!(state.total_skill_points(), 8000);
    }

    #[test]
    fn test_advanced_to_freezes_training() {
        let catalog = catalog();
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut state = CharacterState::new("Pilot", &catalog, [20; 5]);
        state.start_training(
            SkillIndex(2),
            ActiveTraining {
                target_level: 1,
                start_sp: 0,
                end_sp: 250,
                start_time: start,
                end_time: start + Duration::minutes(10),
            },
        );
        assert_eq!(state.training_skill(), Some(SkillIndex(2)));

        let later = state.advanced_to(start + Duration::hours(1));
        assert_eq!(later.skill_level(SkillIndex(2)), 1);
        assert!(later.training_skill().is_none());
        // Source state unchanged
        assert_eq!(state.skill_level(SkillIndex(2)), 0);
    }
}
