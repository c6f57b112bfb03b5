//! Skills - SP curve, static definitions, catalog and per-character records

mod catalog;
mod definition;
pub mod points;
mod record;

pub use catalog::{CatalogError, LearningMap, SkillCatalog};
pub use definition::{Prerequisite, SkillBonus, SkillDefinition};
pub use points::{left_points_to_level, level_for_points, required_points, MAX_LEVEL};
pub use record::{ActiveTraining, SkillRecord};
