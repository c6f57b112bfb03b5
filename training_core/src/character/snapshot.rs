//! CharacterSnapshot - Serializable character data supplied by the host

use crate::types::{SkillId, ATTRIBUTE_COUNT};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Five attribute numbers keyed by name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSet {
    pub intelligence: i32,
    pub perception: i32,
    pub willpower: i32,
    pub charisma: i32,
    pub memory: i32,
}

impl AttributeSet {
    /// Values in `Attribute::all()` order
    pub fn to_array(self) -> [i32; ATTRIBUTE_COUNT] {
        [
            self.intelligence,
            self.perception,
            self.willpower,
            self.charisma,
            self.memory,
        ]
    }

    pub fn from_array(values: [i32; ATTRIBUTE_COUNT]) -> Self {
        let [intelligence, perception, willpower, charisma, memory] = values;
        AttributeSet {
            intelligence,
            perception,
            willpower,
            charisma,
            memory,
        }
    }
}

/// Imported progress in one skill
///
/// Signed so corrupt negative values can be read and repaired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSnapshot {
    pub skill: SkillId,
    #[serde(default)]
    pub skill_points: i64,
    #[serde(default)]
    pub level: i64,
}

/// The skill in training at snapshot time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSnapshot {
    pub skill: SkillId,
    pub target_level: u8,
    pub start_sp: u32,
    pub end_sp: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Everything the engine needs to know about a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub name: String,
    pub attributes: AttributeSet,
    #[serde(default)]
    pub implants: AttributeSet,
    #[serde(default)]
    pub skills: Vec<SkillSnapshot>,
    #[serde(default)]
    pub training: Option<TrainingSnapshot>,
}
