//! Attribute remapping - Find the allocation that trains a plan fastest

mod optimizer;
mod result;

pub use optimizer::{candidate_allocations, RemapPointResult, RemappingOptimizer, ONE_YEAR};
pub use result::{RemapGain, RemapStage, RemappingResult};
