//! AttributeScratchpad - The five attributes of a character, as a value

use super::value::{learning_factor, AttributeValue};
use super::RemapError;
use crate::config::RemapRules;
use crate::skill::LearningMap;
use crate::types::{Attribute, SkillIndex, ATTRIBUTE_COUNT};
use serde::{Deserialize, Serialize};

/// A full set of attributes plus the learning skill level
///
/// Cloning is a deep copy. The optimizer only ever works on clones so the
/// character's live attributes are never touched.
///
/// In remap mode base changes are checked against [`RemapRules`]; in
/// informational mode any base value is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeScratchpad {
    values: [AttributeValue; ATTRIBUTE_COUNT],
    #[serde(default)]
    learning_level: u8,
    #[serde(skip)]
    rules: Option<RemapRules>,
}

impl AttributeScratchpad {
    /// Informational scratchpad from base values, in [`Attribute::all`] order
    pub fn new(bases: [i32; ATTRIBUTE_COUNT]) -> Self {
        AttributeScratchpad {
            values: bases.map(AttributeValue::with_base),
            learning_level: 0,
            rules: None,
        }
    }

    /// Switch to remap mode, enforcing `rules` on further base changes
    pub fn in_remap_mode(mut self, rules: RemapRules) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn rules(&self) -> Option<RemapRules> {
        self.rules
    }

    pub fn value(&self, attribute: Attribute) -> &AttributeValue {
        &self.values[attribute.index()]
    }

    pub fn base(&self, attribute: Attribute) -> i32 {
        self.values[attribute.index()].base
    }

    /// Base values in [`Attribute::all`] order
    pub fn bases(&self) -> [i32; ATTRIBUTE_COUNT] {
        self.values.map(|v| v.base)
    }

    /// Copy with the given bases, bonuses untouched, no rule checks
    pub(crate) fn with_bases(&self, bases: [i32; ATTRIBUTE_COUNT]) -> Self {
        let mut copy = self.clone();
        for (value, base) in copy.values.iter_mut().zip(bases) {
            value.base = base;
        }
        copy
    }

    pub fn learning_level(&self) -> u8 {
        self.learning_level
    }

    pub fn set_learning_level(&mut self, level: u8) {
        self.learning_level = level;
    }

    pub fn learning_factor(&self) -> f64 {
        learning_factor(self.learning_level)
    }

    /// `(base + implant + skill bonus) × learning factor`
    pub fn effective_value(&self, attribute: Attribute) -> f64 {
        self.values[attribute.index()].effective(self.learning_factor())
    }

    pub fn set_implant_bonus(&mut self, attribute: Attribute, bonus: i32) {
        self.values[attribute.index()].implant_bonus = bonus;
    }

    pub fn set_skill_bonus(&mut self, attribute: Attribute, bonus: i32) {
        self.values[attribute.index()].skill_bonus = bonus;
    }

    /// Recompute learning level and attribute skill bonuses from skill levels
    pub fn apply_skill_bonuses<F>(&mut self, map: &LearningMap, level_of: F)
    where
        F: Fn(SkillIndex) -> u8,
    {
        self.learning_level = map.learning.map(&level_of).unwrap_or(0);
        for attr in Attribute::all() {
            let bonus: i32 = map.skills_for(*attr).iter().map(|&s| level_of(s) as i32).sum();
            self.values[attr.index()].skill_bonus = bonus;
        }
    }

    /// Set a base value
    ///
    /// In remap mode the value must lie within floor and ceiling and the
    /// resulting allocation must fit the pool; on error nothing changes.
    pub fn set_base(&mut self, attribute: Attribute, value: i32) -> Result<(), RemapError> {
        if let Some(rules) = self.rules {
            check_bounds(attribute, value, &rules)?;
            let spent = self.spent_points(&rules) - (self.base(attribute) - rules.floor)
                + (value - rules.floor);
            if spent > rules.pool {
                return Err(RemapError::PoolExceeded {
                    spent,
                    pool: rules.pool,
                });
            }
        }
        self.values[attribute.index()].base = value;
        Ok(())
    }

    /// Points allocated above the floor across all attributes
    pub fn spent_points(&self, rules: &RemapRules) -> i32 {
        self.values.iter().map(|v| v.base - rules.floor).sum()
    }

    /// Points left in the pool
    pub fn unassigned_points(&self, rules: &RemapRules) -> i32 {
        rules.pool - self.spent_points(rules)
    }

    /// Check every base against `rules`
    pub fn validate(&self, rules: &RemapRules) -> Result<(), RemapError> {
        for attr in Attribute::all() {
            check_bounds(*attr, self.base(*attr), rules)?;
        }
        let spent = self.spent_points(rules);
        if spent > rules.pool {
            return Err(RemapError::PoolExceeded {
                spent,
                pool: rules.pool,
            });
        }
        Ok(())
    }

    /// Manhattan distance between base values
    pub fn base_distance(&self, other: &AttributeScratchpad) -> i32 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a.base - b.base).abs())
            .sum()
    }
}

fn check_bounds(attribute: Attribute, value: i32, rules: &RemapRules) -> Result<(), RemapError> {
    if value < rules.floor {
        return Err(RemapError::BelowFloor {
            attribute,
            value,
            floor: rules.floor,
        });
    }
    if value > rules.ceiling {
        return Err(RemapError::AboveCeiling {
            attribute,
            value,
            ceiling: rules.ceiling,
        });
    }
    Ok(())
}
