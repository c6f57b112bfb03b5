//! Skill catalog loading

use super::ConfigError;
use crate::skill::{SkillCatalog, SkillDefinition};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for skill definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    #[serde(rename = "skills")]
    pub skills: Vec<SkillDefinition>,
}

/// Load a skill catalog from a TOML file
pub fn load_skill_catalog(path: &Path) -> Result<SkillCatalog, ConfigError> {
    let config: SkillsConfig = super::load_toml(path)?;
    Ok(SkillCatalog::new(config.skills)?)
}

/// Load a skill catalog from a TOML string
pub fn parse_skill_catalog(content: &str) -> Result<SkillCatalog, ConfigError> {
    let config: SkillsConfig = super::parse_toml(content)?;
    Ok(SkillCatalog::new(config.skills)?)
}

/// Get the built-in skill catalog
pub fn default_catalog() -> SkillCatalog {
    let toml = include_str!("../../config/skills.toml");
    parse_skill_catalog(toml).unwrap_or_else(|e| {
        tracing::warn!("Built-in skill catalog failed to load: {}", e);
        SkillCatalog::default()
    })
}
