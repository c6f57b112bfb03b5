//! training_core - Skill training time and attribute remapping engine
//!
//! This library provides:
//! - Skill points: the per-rank SP curve and level lookups
//! - SkillCatalog: indexed skill definitions with prerequisites
//! - CharacterState: attributes, implants and per-skill progress
//! - TrainingTimeCalculator: SP/hour and time to train skills and plans
//! - RemappingOptimizer: the attribute allocation that trains a plan fastest

pub mod attributes;
pub mod character;
pub mod config;
pub mod plan;
pub mod prelude;
pub mod remap;
pub mod skill;
pub mod training;
pub mod types;

// Re-export core types for convenience
pub use attributes::{AttributeScratchpad, AttributeValue, RemapError};
pub use character::{CharacterSnapshot, CharacterState};
pub use config::{default_catalog, ConfigError, NewPlayerBonus, RemapRules, TrainingConstants};
pub use plan::{PlanError, RemapPoint, ResolvedGoal, ResolvedPlan, TrainingGoal, TrainingPlan};
pub use remap::{RemapGain, RemapPointResult, RemapStage, RemappingOptimizer, RemappingResult, ONE_YEAR};
pub use skill::{CatalogError, SkillCatalog, SkillDefinition, SkillRecord};
pub use training::{TrainingSimulation, TrainingStep, TrainingTimeCalculator};
pub use types::{Attribute, SkillId, SkillIndex};
