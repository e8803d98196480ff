//! YAML configuration file support.
//!
//! One file configures both engines. Every section and every field is
//! optional; anything left out keeps the built-in shop policy.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "seoul-branch"
//!
//! matcher:
//!   wildcard_models: ["전차종", "all"]
//!   model_score: 40
//!   keyword_score: 30
//!   mileage_bands:
//!     - { max_diff: 5000, score: 20 }
//!     - { max_diff: 15000, score: 10 }
//!   max_results: 3
//!   explain: false
//!
//! rules:
//!   oil_watch_diff: 7000
//!   oil_change_diff: 10000
//!   aged_vehicle_years: 8
//!   brake_pad_interval: 40000
//!   brake_pad_window: 3000
//!   memo_max_chars: 20
//! ```

use std::fs;
use std::path::Path;

use matcher::MatchConfig;
use rules::RuleConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for the inspection engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Recommendation scoring
    #[serde(default)]
    pub matcher: MatchConfig,

    /// Checklist correction thresholds and memo texts
    #[serde(default)]
    pub rules: RuleConfig,
}

impl EngineConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.matcher
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("matcher: {err}")))?;
        self.rules
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("rules: {err}")))?;

        Ok(())
    }

    pub fn to_match_config(&self) -> MatchConfig {
        self.matcher.clone()
    }

    pub fn to_rule_config(&self) -> RuleConfig {
        self.rules.clone()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            name: None,
            matcher: MatchConfig::default(),
            rules: RuleConfig::default(),
        }
    }
}

fn default_version() -> String {
    "1.0".to_string()
}
