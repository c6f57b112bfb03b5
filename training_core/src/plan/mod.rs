//! Training plans - Ordered (skill, level) goals

use crate::character::AttributeSet;
use crate::skill::{SkillCatalog, MAX_LEVEL};
use crate::types::{SkillId, SkillIndex, ATTRIBUTE_COUNT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Plan validation error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Goal {skill} level {level} is outside 1-5")]
    InvalidLevel { skill: SkillId, level: u8 },
    #[error("Unknown skill in plan: {0}")]
    UnknownSkill(SkillId),
}

/// An attribute remap taken just before a goal starts
///
/// Without attributes the point is a placeholder: training continues under
/// the bases in force until it is solved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemapPoint {
    #[serde(default)]
    pub attributes: Option<AttributeSet>,
}

impl RemapPoint {
    /// A point switching to `bases`, in `Attribute::all()` order
    pub fn with_bases(bases: [i32; ATTRIBUTE_COUNT]) -> Self {
        RemapPoint {
            attributes: Some(AttributeSet::from_array(bases)),
        }
    }

    pub fn bases(&self) -> Option<[i32; ATTRIBUTE_COUNT]> {
        self.attributes.map(AttributeSet::to_array)
    }
}

/// Train `skill` up to `level`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingGoal {
    pub skill: SkillId,
    pub level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remap: Option<RemapPoint>,
}

impl TrainingGoal {
    pub fn new(skill: impl Into<SkillId>, level: u8) -> Result<Self, PlanError> {
        let skill = skill.into();
        if level == 0 || level > MAX_LEVEL {
            return Err(PlanError::InvalidLevel { skill, level });
        }
        Ok(TrainingGoal {
            skill,
            level,
            remap: None,
        })
    }

    /// Builder: remap before this goal
    pub fn with_remap(mut self, point: RemapPoint) -> Self {
        self.remap = Some(point);
        self
    }
}

/// An ordered list of goals
///
/// Order matters: SP gained by one goal is the starting point of later
/// goals on the same skill, and learning skills speed up what follows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPlan {
    #[serde(default)]
    pub goals: Vec<TrainingGoal>,
}

impl TrainingPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a goal, validating its level
    pub fn push(&mut self, skill: impl Into<SkillId>, level: u8) -> Result<(), PlanError> {
        self.goals.push(TrainingGoal::new(skill, level)?);
        Ok(())
    }

    /// Append a goal preceded by a remap point
    pub fn push_with_remap(
        &mut self,
        skill: impl Into<SkillId>,
        level: u8,
        point: RemapPoint,
    ) -> Result<(), PlanError> {
        self.goals.push(TrainingGoal::new(skill, level)?.with_remap(point));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Bind every goal to catalog indices
    ///
    /// Deserialized plans bypass [`TrainingGoal::new`], so levels are
    /// checked again here.
    pub fn resolve(&self, catalog: &SkillCatalog) -> Result<ResolvedPlan, PlanError> {
        let goals = self
            .goals
            .iter()
            .map(|goal| {
                if goal.level == 0 || goal.level > MAX_LEVEL {
                    return Err(PlanError::InvalidLevel {
                        skill: goal.skill.clone(),
                        level: goal.level,
                    });
                }
                let skill = catalog
                    .index_of(&goal.skill)
                    .ok_or_else(|| PlanError::UnknownSkill(goal.skill.clone()))?;
                Ok(ResolvedGoal {
                    skill,
                    level: goal.level,
                    remap: goal.remap,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ResolvedPlan { goals })
    }
}

/// A goal bound to a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedGoal {
    pub skill: SkillIndex,
    pub level: u8,
    pub remap: Option<RemapPoint>,
}

impl ResolvedGoal {
    pub fn new(skill: SkillIndex, level: u8) -> Self {
        ResolvedGoal {
            skill,
            level,
            remap: None,
        }
    }

    /// Bases this goal switches to before training, if any
    pub fn remap_bases(&self) -> Option<[i32; ATTRIBUTE_COUNT]> {
        self.remap.and_then(|point| point.bases())
    }
}

/// A plan bound to a catalog, ready for evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPlan {
    pub goals: Vec<ResolvedGoal>,
}

impl ResolvedPlan {
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// The first `count` goals
    pub fn truncated(&self, count: usize) -> ResolvedPlan {
        ResolvedPlan {
            goals: self.goals.iter().take(count).copied().collect(),
        }
    }

    /// Indices of goals preceded by a remap point
    pub fn remap_points(&self) -> Vec<usize> {
        self.goals
            .iter()
            .enumerate()
            .filter(|(_, goal)| goal.remap.is_some())
            .map(|(i, _)| i)
            .collect()
    }

    /// Place a remap point with `bases` before goal `index`
    ///
    /// Out of range indices are ignored.
    pub fn set_remap_bases(&mut self, index: usize, bases: [i32; ATTRIBUTE_COUNT]) {
        if let Some(goal) = self.goals.get_mut(index) {
            goal.remap = Some(RemapPoint::with_bases(bases));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::SkillDefinition;
    use crate::types::Attribute::*;

    fn catalog() -> SkillCatalog {
        SkillCatalog::new(vec![
            SkillDefinition::new("gunnery", "Gunnery", 1, Perception, Willpower),
            SkillDefinition::new("mechanics", "Mechanics", 1, Intelligence, Memory),
        ])
        .unwrap()
    }

    #[test]
    fn test_goal_level_validation() {
        assert!(TrainingGoal::new("gunnery", 1).is_ok());
        assert!(TrainingGoal::new("gunnery", 5).is_ok());
        assert_eq!(
            TrainingGoal::new("gunnery", 0),
            Err(PlanError::InvalidLevel {
                skill: "gunnery".into(),
                level: 0
            })
        );
        assert!(TrainingGoal::new("gunnery", 6).is_err());
    }

    #[test]
    fn test_resolve() {
        let mut plan = TrainingPlan::new();
        plan.push("mechanics", 3).unwrap();
        plan.push("gunnery", 2).unwrap();

        let resolved = plan.resolve(&catalog()).unwrap();
        assert_eq!(
            resolved.goals,
            vec![
                ResolvedGoal::new(SkillIndex(1), 3),
                ResolvedGoal::new(SkillIndex(0), 2),
            ]
        );
        assert_eq!(resolved.truncated(1).len(), 1);
    }

    #[test]
    fn test_resolve_unknown_skill() {
        let mut plan = TrainingPlan::new();
        plan.push("astrometrics", 1).unwrap();
        assert_eq!(
            plan.resolve(&catalog()),
            Err(PlanError::UnknownSkill("astrometrics".into()))
        );
    }

    #[test]
    fn test_parse_plan_rechecks_levels() {
        let toml = r#"
[[goals]]
skill = "gunnery"
level = 7
"#;
        let plan: TrainingPlan = toml::from_str(toml).unwrap();
        assert!(matches!(plan.resolve(&catalog()), Err(PlanError::InvalidLevel { .. })));
    }

    #[test]
    fn test_parse_remap_points() {
        let toml = r#"
[[goals]]
skill = "mechanics"
level = 3

[[goals]]
skill = "gunnery"
level = 4
remap = { attributes = { intelligence = 17, perception = 27, willpower = 21, charisma = 17, memory = 17 } }

[[goals]]
skill = "mechanics"
level = 4
remap = {}
"#;
        let plan: TrainingPlan = toml::from_str(toml).unwrap();
        let resolved = plan.resolve(&catalog()).unwrap();

        assert_eq!(resolved.remap_points(), vec![1, 2]);
        assert_eq!(resolved.goals[0].remap_bases(), None);
        assert_eq!(resolved.goals[1].remap_bases(), Some([17, 27, 21, 17, 17]));
        // Placeholder point, not yet solved
        assert_eq!(resolved.goals[2].remap, Some(RemapPoint::default()));
        assert_eq!(resolved.goals[2].remap_bases(), None);
    }

    #[test]
    fn test_set_remap_bases() {
        let mut plan = TrainingPlan::new();
        plan.push("mechanics", 2).unwrap();
        plan.push_with_remap("gunnery", 2, RemapPoint::default()).unwrap();
        let mut resolved = plan.resolve(&catalog()).unwrap();

        resolved.set_remap_bases(1, [27, 17, 17, 17, 21]);
        resolved.set_remap_bases(9, [27, 17, 17, 17, 21]);
        assert_eq!(resolved.goals[1].remap_bases(), Some([27, 17, 17, 17, 21]));
        assert_eq!(resolved.remap_points(), vec![1]);
    }
}
