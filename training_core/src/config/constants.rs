//! Training constants configuration

use serde::{Deserialize, Serialize};

/// Tunable training rules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingConstants {
    #[serde(default)]
    pub remap: RemapRules,
    #[serde(default)]
    pub new_player_bonus: NewPlayerBonus,
    #[serde(default)]
    pub search: SearchLimits,
}

/// Bounds of an attribute remap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemapRules {
    /// Lowest base value any attribute may be remapped to
    #[serde(default = "default_floor")]
    pub floor: i32,
    /// Highest base value any attribute may be remapped to
    #[serde(default = "default_ceiling")]
    pub ceiling: i32,
    /// Points distributable above the floor across all attributes
    #[serde(default = "default_pool")]
    pub pool: i32,
}

impl Default for RemapRules {
    fn default() -> Self {
        RemapRules {
            floor: default_floor(),
            ceiling: default_ceiling(),
            pool: default_pool(),
        }
    }
}

impl RemapRules {
    /// Most points a single attribute can take above the floor
    pub fn per_attribute_span(&self) -> i32 {
        (self.ceiling - self.floor).max(0)
    }
}

fn default_floor() -> i32 {
    17
}
fn default_ceiling() -> i32 {
    27
}
fn default_pool() -> i32 {
    14
}

/// Accelerated training for young characters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewPlayerBonus {
    /// Character SP total below which the bonus applies
    #[serde(default = "default_bonus_threshold")]
    pub threshold: u64,
    /// Training speed multiplier while below the threshold
    #[serde(default = "default_bonus_multiplier")]
    pub multiplier: f64,
}

impl Default for NewPlayerBonus {
    fn default() -> Self {
        NewPlayerBonus {
            threshold: default_bonus_threshold(),
            multiplier: default_bonus_multiplier(),
        }
    }
}

impl NewPlayerBonus {
    /// A bonus that never applies
    pub fn disabled() -> Self {
        NewPlayerBonus {
            threshold: 0,
            multiplier: 1.0,
        }
    }
}

fn default_bonus_threshold() -> u64 {
    1_600_000
}
fn default_bonus_multiplier() -> f64 {
    2.0
}

/// Remapping search limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Maximum number of allocations evaluated per search
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_candidates: default_max_candidates(),
        }
    }
}

fn default_max_candidates() -> usize {
    100_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = TrainingConstants::default();
        assert_eq!(constants.remap.floor, 17);
        assert_eq!(constants.remap.ceiling, 27);
        assert_eq!(constants.remap.pool, 14);
        assert_eq!(constants.new_player_bonus.threshold, 1_600_000);
        assert!((constants.new_player_bonus.multiplier - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_constants() {
        let toml = r#"
[remap]
floor = 5
ceiling = 15
pool = 14

[new_player_bonus]
threshold = 800000

[search]
max_candidates = 500
"#;

        let constants: TrainingConstants = toml::from_str(toml).unwrap();
        assert_eq!(constants.remap.floor, 5);
        assert_eq!(constants.remap.per_attribute_span(), 10);
        assert_eq!(constants.new_player_bonus.threshold, 800_000);
        assert!((constants.new_player_bonus.multiplier - 2.0).abs() < f64::EPSILON);
        assert_eq!(constants.search.max_candidates, 500);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let constants: TrainingConstants = toml::from_str("").unwrap();
        assert_eq!(constants.remap, RemapRules::default());
    }
}
