//! RemappingResult - An allocation paired with the plan duration it yields

use crate::attributes::AttributeScratchpad;
use crate::config::RemapRules;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a result was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "stage")]
pub enum RemapStage {
    /// Current attributes only, nothing searched
    Initial,
    /// Best allocation found by a search over `candidates` allocations
    Optimized { candidates: usize },
    /// A user supplied allocation, evaluated once
    Manual,
}

/// Difference between the best and base durations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemapGain {
    Faster(Duration),
    Slower(Duration),
    Same,
}

/// Base and candidate allocations with their plan durations
///
/// An optimized result never has `best_duration > base_duration` unless the
/// current attributes were outside the remap rules. A manual result may be
/// slower too; [`gain`](Self::gain) reports either as `Slower`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemappingResult {
    pub stage: RemapStage,
    /// The character's current attributes
    pub base_scratchpad: AttributeScratchpad,
    /// The proposed attributes
    pub best_scratchpad: AttributeScratchpad,
    /// Plan duration under current attributes
    pub base_duration: Duration,
    /// Plan duration under the proposed attributes
    pub best_duration: Duration,
}

impl RemappingResult {
    /// A result where nothing changes
    pub fn unchanged(stage: RemapStage, scratchpad: AttributeScratchpad, duration: Duration) -> Self {
        RemappingResult {
            stage,
            base_scratchpad: scratchpad.clone(),
            best_scratchpad: scratchpad,
            base_duration: duration,
            best_duration: duration,
        }
    }

    pub fn gain(&self) -> RemapGain {
        if self.best_duration < self.base_duration {
            RemapGain::Faster(self.base_duration - self.best_duration)
        } else if self.best_duration > self.base_duration {
            RemapGain::Slower(self.best_duration - self.base_duration)
        } else {
            RemapGain::Same
        }
    }

    pub fn is_improvement(&self) -> bool {
        matches!(self.gain(), RemapGain::Faster(_))
    }

    /// Pool points the proposed allocation leaves unspent
    pub fn unassigned_points(&self, rules: &RemapRules) -> i32 {
        self.best_scratchpad.unassigned_points(rules)
    }

    /// Whether the proposed bases differ from the current ones
    pub fn changes_attributes(&self) -> bool {
        self.base_scratchpad.bases() != self.best_scratchpad.bases()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(base_secs: u64, best_secs: u64) -> RemappingResult {
        RemappingResult {
            stage: RemapStage::Manual,
            base_scratchpad: AttributeScratchpad::new([20, 20, 20, 20, 19]),
            best_scratchpad: AttributeScratchpad::new([27, 17, 17, 17, 24]),
            base_duration: Duration::from_secs(base_secs),
            best_duration: Duration::from_secs(best_secs),
        }
    }

    #[test]
    fn test_gain() {
        assert_eq!(result(100, 60).gain(), RemapGain::Faster(Duration::from_secs(40)));
        assert_eq!(result(60, 100).gain(), RemapGain::Slower(Duration::from_secs(40)));
        assert_eq!(result(60, 60).gain(), RemapGain::Same);
        assert!(result(100, 60).is_improvement());
    }

    #[test]
    fn test_unassigned_points() {
        let r = result(1, 1);
        assert_eq!(r.unassigned_points(&RemapRules::default()), 0);
        assert!(r.changes_attributes());
    }

    #[test]
    fn test_unchanged() {
        let pad = AttributeScratchpad::new([17; 5]);
        let r = RemappingResult::unchanged(RemapStage::Initial, pad, Duration::ZERO);
        assert_eq!(r.gain(), RemapGain::Same);
        assert!(!r.changes_attributes());
        assert_eq!(r.unassigned_points(&RemapRules::default()), 14);
    }
}
