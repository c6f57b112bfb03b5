//! Configuration loading from TOML files

mod constants;
mod skills;

pub use constants::{NewPlayerBonus, RemapRules, SearchLimits, TrainingConstants};
pub use skills::{default_catalog, load_skill_catalog, parse_skill_catalog, SkillsConfig};

use crate::skill::CatalogError;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
    #[error("Invalid skill catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load training constants, checking the remap rules are usable
pub fn load_constants(path: &Path) -> Result<TrainingConstants, ConfigError> {
    let constants: TrainingConstants = load_toml(path)?;
    validate_constants(&constants)?;
    Ok(constants)
}

/// Parse training constants from a TOML string
pub fn parse_constants(content: &str) -> Result<TrainingConstants, ConfigError> {
    let constants: TrainingConstants = parse_toml(content)?;
    validate_constants(&constants)?;
    Ok(constants)
}

fn validate_constants(constants: &TrainingConstants) -> Result<(), ConfigError> {
    let remap = &constants.remap;
    if remap.ceiling < remap.floor {
        return Err(ConfigError::ValidationError(format!(
            "remap ceiling {} is below floor {}",
            remap.ceiling, remap.floor
        )));
    }
    if remap.pool < 0 {
        return Err(ConfigError::ValidationError(format!(
            "remap pool must not be negative, got {}",
            remap.pool
        )));
    }
    let bonus = &constants.new_player_bonus;
    if bonus.multiplier.is_nan() || bonus.multiplier < 1.0 {
        return Err(ConfigError::ValidationError(format!(
            "new player bonus multiplier must be at least 1.0, got {}",
            bonus.multiplier
        )));
    }
    if constants.search.max_candidates == 0 {
        return Err(ConfigError::ValidationError(
            "search.max_candidates must be positive".to_string(),
        ));
    }
    Ok(())
}
