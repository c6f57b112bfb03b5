//! SkillDefinition - Static per-skill data

use crate::skill::points::{self, MAX_LEVEL};
use crate::types::{Attribute, SkillId};
use serde::{Deserialize, Serialize};

/// Bonus a skill grants to attributes once trained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "attribute")]
pub enum SkillBonus {
    /// No attribute effect
    #[default]
    None,
    /// Multiplies every attribute by 2% per level
    Learning,
    /// Adds 1 to the given attribute per level
    Attribute(Attribute),
}

/// A (skill, level) requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prerequisite {
    pub skill: SkillId,
    pub level: u8,
}

/// Static definition of a trainable skill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDefinition {
    /// Unique identifier
    pub id: SkillId,
    /// Display name
    pub name: String,
    /// Training time multiplier
    pub rank: u32,
    /// Attribute counted in full for training speed
    pub primary: Attribute,
    /// Attribute counted at half weight for training speed
    pub secondary: Attribute,
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
    #[serde(default)]
    pub bonus: SkillBonus,
}

impl SkillDefinition {
    /// Create a definition with no prerequisites and no bonus
    pub fn new(
        id: impl Into<SkillId>,
        name: impl Into<String>,
        rank: u32,
        primary: Attribute,
        secondary: Attribute,
    ) -> Self {
        SkillDefinition {
            id: id.into(),
            name: name.into(),
            rank,
            primary,
            secondary,
            prerequisites: Vec::new(),
            bonus: SkillBonus::None,
        }
    }

    /// Builder: add a prerequisite
    pub fn requires(mut self, skill: impl Into<SkillId>, level: u8) -> Self {
        self.prerequisites.push(Prerequisite {
            skill: skill.into(),
            level,
        });
        self
    }

    /// Builder: set the attribute bonus
    pub fn with_bonus(mut self, bonus: SkillBonus) -> Self {
        self.bonus = bonus;
        self
    }

    /// Cumulative SP required to reach `level`
    pub fn points_for_level(&self, level: u8) -> u32 {
        points::required_points(self.rank, level)
    }

    /// SP at level 5
    pub fn max_points(&self) -> u32 {
        points::required_points(self.rank, MAX_LEVEL)
    }
}
