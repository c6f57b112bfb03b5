//! Result formatting for text and JSON output

use serde::Serialize;
use std::fmt;
use std::time::Duration;
use training_core::types::ATTRIBUTE_COUNT;
use training_core::remap::{RemapGain, RemapPointResult, RemapStage};
use training_core::{
    Attribute, CharacterState, RemappingOptimizer, RemappingResult, SkillCatalog, TrainingStep,
};

/// One attribute row
#[derive(Debug, Serialize)]
pub struct AttributeRow {
    pub attribute: Attribute,
    pub current: i32,
    pub proposed: i32,
    /// Effective value under the proposed bases, learning included
    pub effective: f64,
}

/// One trained level
#[derive(Debug, Serialize)]
pub struct StepRow {
    pub skill: String,
    pub level: u8,
    pub start_hours: f64,
    pub hours: f64,
    pub sp_per_hour: f64,
}

/// One solved remap point
#[derive(Debug, Serialize)]
pub struct RemapPointRow {
    /// Index of the goal the point precedes
    pub goal: usize,
    pub skill: String,
    pub level: u8,
    pub current: [i32; ATTRIBUTE_COUNT],
    pub proposed: [i32; ATTRIBUTE_COUNT],
    /// Positive when the proposed allocation is faster for its section
    pub saved_seconds: i64,
}

/// Everything printed for a run
#[derive(Debug, Serialize)]
pub struct Report {
    pub character: String,
    pub stage: RemapStage,
    pub goals: usize,
    pub attributes: Vec<AttributeRow>,
    pub base_seconds: u64,
    pub best_seconds: u64,
    /// Positive when the proposed allocation is faster
    pub saved_seconds: i64,
    pub unassigned_points: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remap_points: Option<Vec<RemapPointRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<StepRow>>,
}

impl Report {
    pub fn new(
        catalog: &SkillCatalog,
        character: &CharacterState,
        optimizer: &RemappingOptimizer<'_>,
        result: &RemappingResult,
        steps: Option<&[TrainingStep]>,
        points: Option<&[RemapPointResult]>,
    ) -> Self {
        let current = result.base_scratchpad.bases();
        let proposed = result.best_scratchpad.bases();
        let attributes = Attribute::all()
            .iter()
            .map(|&attribute| AttributeRow {
                attribute,
                current: current[attribute.index()],
                proposed: proposed[attribute.index()],
                effective: result.best_scratchpad.effective_value(attribute),
            })
            .collect();

        let remap_points = points.map(|points| {
            points
                .iter()
                .filter_map(|point| {
                    let goal = optimizer.plan().goals.get(point.goal)?;
                    Some(RemapPointRow {
                        goal: point.goal,
                        skill: catalog.get(goal.skill).name.clone(),
                        level: goal.level,
                        current: point.result.base_scratchpad.bases(),
                        proposed: point.result.best_scratchpad.bases(),
                        saved_seconds: signed_seconds(point.result.gain()),
                    })
                })
                .collect()
        });

        let steps = steps.map(|steps| {
            steps
                .iter()
                .map(|step| StepRow {
                    skill: catalog.get(step.skill).name.clone(),
                    level: step.level,
                    start_hours: step.start_hours,
                    hours: step.hours,
                    sp_per_hour: step.sp_per_hour,
                })
                .collect()
        });

        Report {
            character: character.name.clone(),
            stage: result.stage,
            goals: optimizer.plan().len(),
            attributes,
            base_seconds: result.base_duration.as_secs(),
            best_seconds: result.best_duration.as_secs(),
            saved_seconds: signed_seconds(result.gain()),
            unassigned_points: result.unassigned_points(&optimizer.rules()),
            remap_points,
            steps,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.stage {
            RemapStage::Initial => "current attributes".to_string(),
            RemapStage::Optimized { candidates } => format!("best of {} allocations", candidates),
            RemapStage::Manual => "manual allocation".to_string(),
        };
        writeln!(f, "{} - {} goals, {}", self.character, self.goals, label)?;
        writeln!(f)?;
        writeln!(f, "{:<20} {:>7} {:>8} {:>9}", "Attribute", "Current", "Proposed", "Effective")?;
        for row in &self.attributes {
            writeln!(
                f,
                "{:<20} {:>7} {:>8} {:>9.2}",
                format!("{} ({})", row.attribute, row.attribute.abbreviation()),
                row.current,
                row.proposed,
                row.effective
            )?;
        }
        if self.unassigned_points != 0 {
            writeln!(f, "Unassigned points: {}", self.unassigned_points)?;
        }
        writeln!(f)?;

        let base = format_duration(Duration::from_secs(self.base_seconds));
        let best = format_duration(Duration::from_secs(self.best_seconds));
        match self.saved_seconds {
            0 => writeln!(f, "Plan duration: {} (no change)", base)?,
            s => writeln!(f, "Plan duration: {} -> {} ({})", base, best, describe_gain(s))?,
        }

        if let Some(points) = &self.remap_points {
            writeln!(f)?;
            writeln!(f, "{:<36} {:<20} {:<20} {}", "Remap point before", "Current", "Proposed", "Section")?;
            for point in points {
                let section = match point.saved_seconds {
                    0 => "no change".to_string(),
                    s => describe_gain(s),
                };
                writeln!(
                    f,
                    "{:<36} {:<20} {:<20} {}",
                    format!("#{} {} {}", point.goal + 1, point.skill, point.level),
                    format_bases(&point.current),
                    format_bases(&point.proposed),
                    section
                )?;
            }
        }

        if let Some(steps) = &self.steps {
            writeln!(f)?;
            writeln!(f, "{:<28} {:>5} {:>10} {:>10} {:>8}", "Skill", "Level", "Start", "Time", "SP/h")?;
            for step in steps {
                writeln!(
                    f,
                    "{:<28} {:>5} {:>10} {:>10} {:>8.0}",
                    step.skill,
                    step.level,
                    format_duration(hours(step.start_hours)),
                    format_duration(hours(step.hours)),
                    step.sp_per_hour
                )?;
            }
        }
        Ok(())
    }
}

/// Seconds gained, negative when slower
///
/// Any nonzero difference counts as at least one second; durations beyond
/// `i64` saturate.
fn signed_seconds(gain: RemapGain) -> i64 {
    let whole_seconds = |d: Duration| {
        let secs = d.as_secs().saturating_add(u64::from(d.subsec_nanos() > 0));
        i64::try_from(secs).unwrap_or(i64::MAX)
    };
    match gain {
        RemapGain::Faster(d) => whole_seconds(d),
        RemapGain::Slower(d) => -whole_seconds(d),
        RemapGain::Same => 0,
    }
}

fn describe_gain(saved_seconds: i64) -> String {
    let amount = format_duration(Duration::from_secs(saved_seconds.unsigned_abs()));
    if saved_seconds > 0 {
        format!("{} faster", amount)
    } else {
        format!("{} slower", amount)
    }
}

fn format_bases(bases: &[i32; ATTRIBUTE_COUNT]) -> String {
    bases
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn hours(value: f64) -> Duration {
    training_core::training::hours_to_duration(value)
}

/// `3d 4h 12m`, dropping leading zero units
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.as_secs() / 60;
    let (days, hours, minutes) = (minutes / 1440, (minutes / 60) % 24, minutes % 60);
    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(59)), "0m");
        assert_eq!(format_duration(Duration::from_secs(600)), "10m");
        assert_eq!(format_duration(Duration::from_secs(3 * 3600 + 120)), "3h 2m");
        assert_eq!(format_duration(Duration::from_secs(2 * 86400 + 3600)), "2d 1h 0m");
    }

    #[test]
    fn test_signed_seconds_rounds_and_saturates() {
        assert_eq!(signed_seconds(RemapGain::Same), 0);
        assert_eq!(signed_seconds(RemapGain::Faster(Duration::from_millis(300))), 1);
        assert_eq!(signed_seconds(RemapGain::Slower(Duration::from_millis(300))), -1);
        assert_eq!(signed_seconds(RemapGain::Faster(Duration::from_secs(90))), 90);
        assert_eq!(signed_seconds(RemapGain::Faster(Duration::from_millis(90_500))), 91);
        assert_eq!(signed_seconds(RemapGain::Faster(Duration::MAX)), i64::MAX);
        assert_eq!(signed_seconds(RemapGain::Slower(Duration::MAX)), -i64::MAX);
    }

    #[test]
    fn test_describe_gain() {
        assert_eq!(describe_gain(600), "10m faster");
        assert_eq!(describe_gain(-1), "0m slower");
        assert_eq!(format_bases(&[27, 21, 17, 17, 17]), "27,21,17,17,17");
    }
}
