//! Prelude module for convenient imports
//!
//! ```rust
//! use training_core::prelude::*;
//! ```

// Core types
pub use crate::types::{Attribute, SkillId, SkillIndex, ATTRIBUTE_COUNT};

// Skills
pub use crate::skill::{required_points, SkillBonus, SkillCatalog, SkillDefinition, SkillRecord, MAX_LEVEL};

// Characters
pub use crate::attributes::AttributeScratchpad;
pub use crate::character::{CharacterSnapshot, CharacterState};

// Plans and timing
pub use crate::plan::{RemapPoint, ResolvedGoal, ResolvedPlan, TrainingPlan};
pub use crate::training::TrainingTimeCalculator;

// Remapping
pub use crate::remap::{RemapGain, RemappingOptimizer, RemappingResult, ONE_YEAR};

// Config
pub use crate::config::{default_catalog, TrainingConstants};
