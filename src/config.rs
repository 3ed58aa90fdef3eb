//! User configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::rank;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ranking: RankingConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Weights used by the urgency scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_in_progress_bonus")]
    pub in_progress_bonus: f64,

    #[serde(default = "default_overdue_bonus")]
    pub overdue_bonus: f64,

    #[serde(default = "default_due_soon_bonus")]
    pub due_soon_bonus: f64,

    #[serde(default = "default_upcoming_bonus")]
    pub upcoming_bonus: f64,

    #[serde(default = "default_recency_divisor")]
    pub recency_divisor: f64,

    #[serde(default = "default_recency_cap")]
    pub recency_cap: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            in_progress_bonus: rank::IN_PROGRESS_BONUS,
            overdue_bonus: rank::OVERDUE_BONUS,
            due_soon_bonus: rank::DUE_SOON_BONUS,
            upcoming_bonus: rank::UPCOMING_BONUS,
            recency_divisor: rank::RECENCY_DIVISOR,
            recency_cap: rank::RECENCY_CAP,
        }
    }
}

fn default_in_progress_bonus() -> f64 {
    rank::IN_PROGRESS_BONUS
}

fn default_overdue_bonus() -> f64 {
    rank::OVERDUE_BONUS
}

fn default_due_soon_bonus() -> f64 {
    rank::DUE_SOON_BONUS
}

fn default_upcoming_bonus() -> f64 {
    rank::UPCOMING_BONUS
}

fn default_recency_divisor() -> f64 {
    rank::RECENCY_DIVISOR
}

fn default_recency_cap() -> f64 {
    rank::RECENCY_CAP
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Narrowest the horizontal rules are drawn
    #[serde(default = "default_min_rule_width")]
    pub min_rule_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            min_rule_width: default_min_rule_width(),
        }
    }
}

fn default_title() -> String {
    "AGAPE".to_string()
}

fn default_min_rule_width() -> usize {
    40
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("ranking.{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f64 },

    #[error("ranking.{field} must not be negative (got {value})")]
    NegativeBonus { field: &'static str, value: f64 },

    #[error(
        "Deadline bonuses must not shrink as the deadline nears.\n\
         Expected overdue_bonus >= due_soon_bonus >= upcoming_bonus"
    )]
    UnorderedBonuses,

    #[error("ranking.recency_divisor must be positive (got {0})")]
    NonPositiveDivisor(f64),

    #[error("ranking.recency_cap must be positive (got {0})")]
    NonPositiveCap(f64),

    #[error("ranking.recency_cap ({cap}) must stay below the smallest bonus ({band})")]
    RecencyCapTooLarge { cap: f64, band: f64 },
}

/// Default location: `<config dir>/agape/config.toml`
pub fn config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().context("Could not determine the user config directory")?;
    Ok(dir.join("agape").join("config.toml"))
}

impl Config {
    /// Load from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load from an explicit path; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config in {:?}", path))
    }

    /// Parse and validate TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.ranking.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write to {:?}", path))?;
        Ok(())
    }

    pub fn scorer(&self) -> std::result::Result<rank::UrgencyScorer, ConfigError> {
        rank::UrgencyScorer::new(&self.ranking)
    }
}

impl RankingConfig {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let bonuses = [
            ("in_progress_bonus", self.in_progress_bonus),
            ("overdue_bonus", self.overdue_bonus),
            ("due_soon_bonus", self.due_soon_bonus),
            ("upcoming_bonus", self.upcoming_bonus),
        ];

        let weights = bonuses.iter().copied().chain([
            ("recency_divisor", self.recency_divisor),
            ("recency_cap", self.recency_cap),
        ]);
        for (field, value) in weights {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        for (field, value) in bonuses {
            if value < 0.0 {
                return Err(ConfigError::NegativeBonus { field, value });
            }
        }

        if self.overdue_bonus < self.due_soon_bonus || self.due_soon_bonus < self.upcoming_bonus {
            return Err(ConfigError::UnorderedBonuses);
        }

        if self.recency_divisor <= 0.0 {
            return Err(ConfigError::NonPositiveDivisor(self.recency_divisor));
        }

        if self.recency_cap <= 0.0 {
            return Err(ConfigError::NonPositiveCap(self.recency_cap));
        }

        let band = bonuses
            .iter()
            .map(|(_, v)| *v)
            .filter(|v| *v > 0.0)
            .fold(f64::INFINITY, f64::min);
        if self.recency_cap >= band {
            return Err(ConfigError::RecencyCapTooLarge {
                cap: self.recency_cap,
                band,
            });
        }

        Ok(())
    }
}
