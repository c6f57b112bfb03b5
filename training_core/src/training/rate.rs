//! Training rate - SP per hour from attributes, and SP to time conversion

use crate::config::NewPlayerBonus;
use std::time::Duration;

/// SP trained per minute: `primary + secondary / 2`
pub fn sp_per_minute(primary: f64, secondary: f64) -> f64 {
    primary + secondary / 2.0
}

/// SP trained per hour, without the new player bonus
pub fn sp_per_hour(primary: f64, secondary: f64) -> f64 {
    sp_per_minute(primary, secondary) * 60.0
}

/// Time to train `points` at the base rate
///
/// Non-positive point counts take no time.
pub fn time_for_points(points: i64, primary: f64, secondary: f64) -> Duration {
    if points <= 0 {
        return Duration::ZERO;
    }
    hours_to_duration(points as f64 / sp_per_hour(primary, secondary))
}

/// Convert fractional hours into a duration
///
/// Negative and NaN inputs give zero, anything too large saturates.
pub fn hours_to_duration(hours: f64) -> Duration {
    if hours.is_nan() || hours <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(hours * 3600.0).unwrap_or(Duration::MAX)
}

/// Fractional hours in a duration
pub fn duration_to_hours(duration: Duration) -> f64 {
    duration.as_secs_f64() / 3600.0
}

/// Training speed for one skill under fixed attributes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingRate {
    per_hour: f64,
}

impl TrainingRate {
    /// Rate from effective primary and secondary attribute values
    pub fn new(primary: f64, secondary: f64) -> Self {
        TrainingRate {
            per_hour: sp_per_hour(primary, secondary),
        }
    }

    pub fn per_hour(&self) -> f64 {
        self.per_hour
    }

    /// Hours to train `points` with no bonus
    pub fn hours_for(&self, points: u64) -> f64 {
        if points == 0 {
            return 0.0;
        }
        if self.per_hour <= 0.0 {
            return f64::INFINITY;
        }
        points as f64 / self.per_hour
    }

    /// Hours to train `points` starting at character total `total_sp`
    ///
    /// SP trained while the character total is below the bonus threshold go
    /// at the boosted rate. The boundary is prorated: only the part of
    /// `points` that falls under the threshold is boosted.
    pub fn hours_with_bonus(&self, points: u64, total_sp: u64, bonus: &NewPlayerBonus) -> f64 {
        let boosted = bonus.threshold.saturating_sub(total_sp).min(points);
        let regular = points - boosted;
        let multiplier = if bonus.multiplier > 0.0 { bonus.multiplier } else { 1.0 };
        self.hours_for(boosted) / multiplier + self.hours_for(regular)
    }

    /// Effective SP per hour at character total `total_sp`
    pub fn per_hour_with_bonus(&self, total_sp: u64, bonus: &NewPlayerBonus) -> f64 {
        if total_sp < bonus.threshold {
            self.per_hour * bonus.multiplier
        } else {
            self.per_hour
        }
    }
}
