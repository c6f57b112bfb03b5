//! SkillRecord - A character's progress in one skill

use crate::skill::points::{self, MAX_LEVEL};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A skill currently in training
///
/// SP accrue linearly between `start_time` and `end_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveTraining {
    pub target_level: u8,
    pub start_sp: u32,
    pub end_sp: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl ActiveTraining {
    /// Estimated SP at `now`, clamped to the training window
    pub fn skill_points_at(&self, now: DateTime<Utc>) -> u32 {
        if now <= self.start_time {
            return self.start_sp;
        }
        if now >= self.end_time {
            return self.end_sp;
        }

        let total = (self.end_time - self.start_time).num_milliseconds() as f64;
        let elapsed = (now - self.start_time).num_milliseconds() as f64;
        let gained = (self.end_sp.saturating_sub(self.start_sp)) as f64 * elapsed / total;
        self.start_sp + gained.floor() as u32
    }
}

/// Per-character state for a single skill
///
/// The effective level is never stored: it is derived from SP on each read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    rank: u32,
    skill_points: u32,
    last_confirmed_level: u8,
    #[serde(default)]
    training: Option<ActiveTraining>,
}

impl SkillRecord {
    /// An untrained skill
    pub fn untrained(rank: u32) -> Self {
        SkillRecord {
            rank,
            skill_points: 0,
            last_confirmed_level: 0,
            training: None,
        }
    }

    /// Build a record from imported values, repairing corrupt input
    ///
    /// Negative SP become 0, the level is clamped to 0..=5, and SP are raised
    /// to at least the requirement of the confirmed level.
    pub fn from_snapshot(rank: u32, skill_points: i64, confirmed_level: i64) -> Self {
        let level = confirmed_level.clamp(0, MAX_LEVEL as i64) as u8;
        let sp = skill_points.clamp(0, u32::MAX as i64) as u32;
        SkillRecord {
            rank,
            skill_points: sp.max(points::required_points(rank, level)),
            last_confirmed_level: level,
            training: None,
        }
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    /// SP from the last snapshot
    pub fn skill_points(&self) -> u32 {
        self.skill_points
    }

    /// Level reported by the last data refresh
    pub fn last_confirmed_level(&self) -> u8 {
        self.last_confirmed_level
    }

    pub fn training(&self) -> Option<&ActiveTraining> {
        self.training.as_ref()
    }

    pub fn is_training(&self) -> bool {
        self.training.is_some()
    }

    /// Start (or replace) active training
    pub fn set_training(&mut self, training: ActiveTraining) {
        self.training = Some(training);
    }

    pub fn clear_training(&mut self) {
        self.training = None;
    }

    /// Replace the SP total; SP never drop below zero by construction
    pub fn set_skill_points(&mut self, skill_points: u32) {
        self.skill_points = skill_points;
    }

    /// Largest level whose requirement the snapshot SP cover
    pub fn effective_level(&self) -> u8 {
        points::level_for_points(self.rank, self.skill_points)
    }

    /// SP at `now`, estimated if the skill is in training
    ///
    /// The estimate never passes the requirement of the target level.
    pub fn estimated_skill_points(&self, now: DateTime<Utc>) -> u32 {
        match &self.training {
            Some(training) => {
                let target = training.target_level.clamp(1, MAX_LEVEL);
                let cap = points::required_points(self.rank, target);
                training.skill_points_at(now).min(cap).max(self.skill_points)
            }
            None => self.skill_points,
        }
    }

    /// Effective level at `now`
    pub fn estimated_level(&self, now: DateTime<Utc>) -> u8 {
        points::level_for_points(self.rank, self.estimated_skill_points(now))
    }

    /// Freeze the training estimate at `now` into the snapshot SP
    ///
    /// Training that has finished by `now` is dropped.
    pub fn advanced_to(&self, now: DateTime<Utc>) -> Self {
        let skill_points = self.estimated_skill_points(now);
        let training = self
            .training
            .as_ref()
            .filter(|t| now < t.end_time)
            .cloned();
        SkillRecord {
            rank: self.rank,
            skill_points,
            last_confirmed_level: self.last_confirmed_level,
            training,
        }
    }

    /// Whether the skill has reached `level`
    pub fn is_trained_to(&self, level: u8) -> bool {
        self.effective_level() >= level
    }

    /// Fraction of the current level already trained, 1.0 at level 5
    pub fn fraction_completed(&self) -> f64 {
        let level = self.effective_level();
        if level == MAX_LEVEL {
            return 1.0;
        }
        let level_sp = points::required_points(self.rank, level);
        let next_sp = points::required_points(self.rank, level + 1);
        if self.skill_points <= level_sp {
            return 0.0;
        }
        (self.skill_points - level_sp) as f64 / (next_sp - level_sp) as f64
    }

    /// Whether SP sit strictly between two level thresholds
    pub fn is_partially_trained(&self) -> bool {
        let level = self.effective_level();
        level < MAX_LEVEL && self.skill_points > points::required_points(self.rank, level)
    }

    /// SP missing to reach `level`
    pub fn left_points_to_level(&self, level: u8) -> u32 {
        points::left_points_to_level(self.skill_points, self.rank, level)
    }

    /// SP missing for `level` alone
    pub fn left_points_for_level_only(&self, level: u8) -> u32 {
        points::left_points_for_level_only(self.skill_points, self.rank, level)
    }
}
