//! SkillCatalog - Indexed skill definitions with resolved prerequisites

use crate::skill::definition::{SkillBonus, SkillDefinition};
use crate::skill::points::MAX_LEVEL;
use crate::types::{Attribute, SkillId, SkillIndex, ATTRIBUTE_COUNT};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Catalog validation error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate skill id: {0}")]
    DuplicateSkill(SkillId),
    #[error("Skill {0} has rank 0")]
    InvalidRank(SkillId),
    #[error("Skill {skill} requires {prerequisite} at level {level}, expected 1-5")]
    InvalidPrerequisiteLevel {
        skill: SkillId,
        prerequisite: SkillId,
        level: u8,
    },
    #[error("Prerequisite cycle detected at skill {0}")]
    PrerequisiteCycle(SkillId),
}

/// Which skills feed attribute bonuses
///
/// Built once when the catalog loads.
#[derive(Debug, Clone, Default)]
pub struct LearningMap {
    /// The skill multiplying every attribute
    pub learning: Option<SkillIndex>,
    /// Skills adding +1 per level, per attribute
    pub attribute_skills: [Vec<SkillIndex>; ATTRIBUTE_COUNT],
}

impl LearningMap {
    /// Skills boosting the given attribute
    pub fn skills_for(&self, attribute: Attribute) -> &[SkillIndex] {
        &self.attribute_skills[attribute.index()]
    }

    /// Whether training `skill` changes any attribute
    pub fn affects_attributes(&self, skill: SkillIndex) -> bool {
        self.learning == Some(skill) || self.attribute_skills.iter().any(|s| s.contains(&skill))
    }
}

/// Collection of skill definitions addressed by dense index
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    definitions: Vec<SkillDefinition>,
    by_id: HashMap<SkillId, SkillIndex>,
    /// Prerequisites resolved to indices; unknown skills dropped
    prerequisites: Vec<Vec<(SkillIndex, u8)>>,
    learning: LearningMap,
}

impl SkillCatalog {
    /// Build a catalog, validating ranks, prerequisite levels and cycles
    pub fn new(definitions: Vec<SkillDefinition>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(definitions.len());
        for (i, def) in definitions.iter().enumerate() {
            if def.rank == 0 {
                return Err(CatalogError::InvalidRank(def.id.clone()));
            }
            if by_id.insert(def.id.clone(), SkillIndex(i)).is_some() {
                return Err(CatalogError::DuplicateSkill(def.id.clone()));
            }
        }

        let mut prerequisites = Vec::with_capacity(definitions.len());
        for def in &definitions {
            let mut resolved = Vec::with_capacity(def.prerequisites.len());
            for prereq in &def.prerequisites {
                if prereq.level == 0 || prereq.level > MAX_LEVEL {
                    return Err(CatalogError::InvalidPrerequisiteLevel {
                        skill: def.id.clone(),
                        prerequisite: prereq.skill.clone(),
                        level: prereq.level,
                    });
                }
                match by_id.get(&prereq.skill) {
                    Some(&index) => resolved.push((index, prereq.level)),
                    None => tracing::debug!(
                        "Skill {} lists unknown prerequisite {}, ignoring",
                        def.id,
                        prereq.skill
                    ),
                }
            }
            prerequisites.push(resolved);
        }

        let mut learning = LearningMap::default();
        for (i, def) in definitions.iter().enumerate() {
            match def.bonus {
                SkillBonus::None => {}
                SkillBonus::Learning => learning.learning = Some(SkillIndex(i)),
                SkillBonus::Attribute(attr) => {
                    learning.attribute_skills[attr.index()].push(SkillIndex(i))
                }
            }
        }

        let catalog = SkillCatalog {
            definitions,
            by_id,
            prerequisites,
            learning,
        };
        catalog.check_cycles()?;
        Ok(catalog)
    }

    /// Number of skills
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Look up a skill index by id
    pub fn index_of(&self, id: &SkillId) -> Option<SkillIndex> {
        self.by_id.get(id).copied()
    }

    /// Definition at `index`
    ///
    /// # Panics
    /// If the index did not come from this catalog.
    pub fn get(&self, index: SkillIndex) -> &SkillDefinition {
        &self.definitions[index.0]
    }

    /// Look up a definition by id
    pub fn by_id(&self, id: &SkillId) -> Option<&SkillDefinition> {
        self.index_of(id).map(|i| self.get(i))
    }

    /// Iterate over (index, definition)
    pub fn iter(&self) -> impl Iterator<Item = (SkillIndex, &SkillDefinition)> {
        self.definitions
            .iter()
            .enumerate()
            .map(|(i, def)| (SkillIndex(i), def))
    }

    /// Direct prerequisites of a skill
    pub fn prerequisites(&self, index: SkillIndex) -> &[(SkillIndex, u8)] {
        &self.prerequisites[index.0]
    }

    pub fn learning_map(&self) -> &LearningMap {
        &self.learning
    }

    /// Every transitive prerequisite of `index`, deepest first
    ///
    /// A skill appears once per distinct level it is required at, after all of
    /// its own prerequisites.
    pub fn all_prerequisites(&self, index: SkillIndex) -> Vec<(SkillIndex, u8)> {
        self.unmet_prerequisites(index, |_| 0)
    }

    /// Prerequisites of `index` not covered by `level_of`, in training order
    ///
    /// Requirements on a skill that are already scheduled at an equal or
    /// higher level are dropped.
    pub fn unmet_prerequisites<F>(&self, index: SkillIndex, level_of: F) -> Vec<(SkillIndex, u8)>
    where
        F: Fn(SkillIndex) -> u8,
    {
        let mut order = Vec::new();
        let mut scheduled: HashMap<SkillIndex, u8> = HashMap::new();
        let mut in_progress = HashSet::new();
        self.walk_prerequisites(index, &level_of, &mut scheduled, &mut in_progress, &mut order);
        order
    }

    fn walk_prerequisites<F>(
        &self,
        index: SkillIndex,
        level_of: &F,
        scheduled: &mut HashMap<SkillIndex, u8>,
        in_progress: &mut HashSet<SkillIndex>,
        order: &mut Vec<(SkillIndex, u8)>,
    ) where
        F: Fn(SkillIndex) -> u8,
    {
        if !in_progress.insert(index) {
            return;
        }
        for &(prereq, level) in self.prerequisites(index) {
            let known = scheduled
                .get(&prereq)
                .copied()
                .unwrap_or_else(|| level_of(prereq));
            if known >= level {
                continue;
            }
            self.walk_prerequisites(prereq, level_of, scheduled, in_progress, order);
            scheduled.insert(prereq, level);
            order.push((prereq, level));
        }
        in_progress.remove(&index);
    }

    fn check_cycles(&self) -> Result<(), CatalogError> {
        // 0 = unvisited, 1 = on stack, 2 = done
        let mut state = vec![0u8; self.definitions.len()];
        for start in 0..self.definitions.len() {
            if state[start] != 0 {
                continue;
            }
            let mut stack = vec![(start, 0usize)];
            state[start] = 1;
            while let Some(top) = stack.last_mut() {
                let (node, next) = *top;
                if let Some(&(SkillIndex(child), _)) = self.prerequisites[node].get(next) {
                    top.1 += 1;
                    match state[child] {
                        0 => {
                            state[child] = 1;
                            stack.push((child, 0));
                        }
                        1 => {
                            return Err(CatalogError::PrerequisiteCycle(
                                self.definitions[child].id.clone(),
                            ))
                        }
                        _ => {}
                    }
                } else {
                    state[node] = 2;
                    stack.pop();
                }
            }
        }
        Ok(())
    }
}
