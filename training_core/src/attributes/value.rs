//! AttributeValue - One attribute's base, implant and skill contributions

use serde::{Deserialize, Serialize};

/// Learning skill bonus per level (2%)
pub const LEARNING_BONUS_PER_LEVEL: f64 = 0.02;

/// Multiplier granted by the learning skill at `level`
pub fn learning_factor(level: u8) -> f64 {
    1.0 + LEARNING_BONUS_PER_LEVEL * level as f64
}

/// A single attribute
///
/// Effective value is calculated as:
/// `(base + implant_bonus + skill_bonus) × learning_factor`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    /// Value assigned at character creation or remap
    pub base: i32,
    /// Bonus from the active implant set
    #[serde(default)]
    pub implant_bonus: i32,
    /// +1 per level of attribute skills
    #[serde(default)]
    pub skill_bonus: i32,
}

impl AttributeValue {
    pub fn with_base(base: i32) -> Self {
        AttributeValue {
            base,
            implant_bonus: 0,
            skill_bonus: 0,
        }
    }

    /// Sum of the additive parts
    pub fn total_flat(&self) -> i32 {
        self.base + self.implant_bonus + self.skill_bonus
    }

    /// Final value under a learning multiplier
    pub fn effective(&self, learning_factor: f64) -> f64 {
        self.total_flat() as f64 * learning_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_learning_factor() {
        assert!((learning_factor(0) - 1.0).abs() < f64::EPSILON);
        assert!((learning_factor(5) - 1.10).abs() < 1e-12);
    }

    #[test]
    fn test_effective_value() {
        let value = AttributeValue {
            base: 10,
            implant_bonus: 3,
            skill_bonus: 2,
        };
        assert_eq!(value.total_flat(), 15);
        assert!((value.effective(learning_factor(5)) - 16.5).abs() < 1e-9);
    }
}
