//! Attributes - Per-character attribute values and remap constraints

mod scratchpad;
mod value;

pub use scratchpad::AttributeScratchpad;
pub use value::{learning_factor, AttributeValue, LEARNING_BONUS_PER_LEVEL};

use crate::types::Attribute;
use thiserror::Error;

/// Rejected attribute allocation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemapError {
    #[error("{attribute} {value} is below the remap floor of {floor}")]
    BelowFloor {
        attribute: Attribute,
        value: i32,
        floor: i32,
    },
    #[error("{attribute} {value} is above the remap ceiling of {ceiling}")]
    AboveCeiling {
        attribute: Attribute,
        value: i32,
        ceiling: i32,
    },
    #[error("Allocation spends {spent} points, only {pool} available")]
    PoolExceeded { spent: i32, pool: i32 },
}
