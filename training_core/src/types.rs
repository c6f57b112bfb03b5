//! Core types shared across the training engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of character attributes
pub const ATTRIBUTE_COUNT: usize = 5;

/// Character attribute driving training speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Intelligence,
    Perception,
    Willpower,
    Charisma,
    Memory,
}

impl Attribute {
    /// Get all attributes, in storage order
    pub fn all() -> &'static [Attribute; ATTRIBUTE_COUNT] {
        &[
            Attribute::Intelligence,
            Attribute::Perception,
            Attribute::Willpower,
            Attribute::Charisma,
            Attribute::Memory,
        ]
    }

    /// Position of this attribute in per-attribute arrays
    pub fn index(self) -> usize {
        match self {
            Attribute::Intelligence => 0,
            Attribute::Perception => 1,
            Attribute::Willpower => 2,
            Attribute::Charisma => 3,
            Attribute::Memory => 4,
        }
    }

    /// Three letter abbreviation used in compact output
    pub fn abbreviation(self) -> &'static str {
        match self {
            Attribute::Intelligence => "INT",
            Attribute::Perception => "PER",
            Attribute::Willpower => "WIL",
            Attribute::Charisma => "CHA",
            Attribute::Memory => "MEM",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Attribute::Intelligence => "Intelligence",
            Attribute::Perception => "Perception",
            Attribute::Willpower => "Willpower",
            Attribute::Charisma => "Charisma",
            Attribute::Memory => "Memory",
        };
        f.write_str(name)
    }
}

/// Stable identifier of a skill definition
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(pub String);

impl From<&str> for SkillId {
    fn from(s: &str) -> Self {
        SkillId(s.to_string())
    }
}

impl From<String> for SkillId {
    fn from(s: String) -> Self {
        SkillId(s)
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dense index of a skill inside a loaded catalog
///
/// Only meaningful for the catalog that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkillIndex(pub usize);
