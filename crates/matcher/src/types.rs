use canonical::{CanonicalError, NormalizeConfig};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

/// Model sentinels that mean "applies to every vehicle model".
pub const DEFAULT_WILDCARD_MODELS: [&str; 2] = ["전차종", "all"];

/// How a reference record's vehicle model participates in scoring.
///
/// The sheet marks generic entries with a locale-specific sentinel. The
/// engine classifies the normalized model once and scores the class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelPattern {
    /// The record applies to every model.
    Any,
    /// The record names a specific model (normalized).
    Named(String),
    /// The record leaves the model blank.
    Unspecified,
}

impl ModelPattern {
    /// Classify an already-normalized model string against normalized
    /// wildcard aliases.
    pub fn classify(normalized_model: &str, wildcard_aliases: &[String]) -> Self {
        if wildcard_aliases.iter().any(|alias| alias == normalized_model) {
            ModelPattern::Any
        } else if normalized_model.is_empty() {
            ModelPattern::Unspecified
        } else {
            ModelPattern::Named(normalized_model.to_string())
        }
    }
}

/// One checklist row as stored in the reference sheet.
///
/// Status is free text (`"양호"`, `"교환 필요"`, ...) until the caller maps it
/// onto the severity scale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SheetChecklistItem {
    #[serde(default, with = "canonical::loose_text")]
    pub status: String,
    #[serde(default, with = "canonical::loose_text")]
    pub memo: String,
}

/// A historical or template inspection entry from the reference catalog.
///
/// Only `vehicle_model`, `symptom` and `current_mileage` drive scoring. The
/// remaining fields are carried through untouched, including any column the
/// engine does not know about (kept in `extra`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceRecord {
    #[serde(default, with = "canonical::loose_text")]
    pub vehicle_model: String,
    #[serde(default, with = "canonical::loose_text")]
    pub symptom: String,
    #[serde(default, with = "canonical::loose_text")]
    pub current_mileage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist: Option<Vec<SheetChecklistItem>>,
    /// Unknown columns, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl ReferenceRecord {
    /// Convenience constructor for the three scored fields.
    pub fn new(
        vehicle_model: impl Into<String>,
        symptom: impl Into<String>,
        current_mileage: impl Into<String>,
    ) -> Self {
        Self {
            vehicle_model: vehicle_model.into(),
            symptom: symptom.into(),
            current_mileage: current_mileage.into(),
            ..Default::default()
        }
    }
}

/// The inspector's live entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentInput {
    #[serde(default, with = "canonical::loose_text")]
    pub vehicle_model: String,
    #[serde(default, with = "canonical::loose_text")]
    pub symptom: String,
    #[serde(default, with = "canonical::loose_text")]
    pub current_mileage: String,
}

impl CurrentInput {
    pub fn new(
        vehicle_model: impl Into<String>,
        symptom: impl Into<String>,
        current_mileage: impl Into<String>,
    ) -> Self {
        Self {
            vehicle_model: vehicle_model.into(),
            symptom: symptom.into(),
            current_mileage: current_mileage.into(),
        }
    }
}

/// Per-term contribution to a candidate's score.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreBreakdown {
    /// Points from the vehicle model term (wildcard or substring match).
    pub model: u32,
    /// Points from symptom keyword overlap.
    pub symptom: u32,
    /// Points from odometer proximity.
    pub mileage: u32,
    /// Reference keywords found in the input symptom, in reference order.
    pub matched_keywords: Vec<String>,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.model
            .saturating_add(self.symptom)
            .saturating_add(self.mileage)
    }
}

/// A reference record annotated with its relevance score.
///
/// Serializes as the original record with `score` added alongside its
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub record: ReferenceRecord,
    pub score: u32,
    /// Populated only when [`MatchConfig::explain`] is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

/// Score awarded when the odometer difference falls within `max_diff`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MileageBand {
    /// Inclusive upper bound on the absolute odometer difference.
    pub max_diff: u64,
    pub score: u32,
}

/// Configuration for relevance scoring.
///
/// The defaults are the production weights; changing any of them changes
/// which candidates inspectors see, so bump `version` with them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Configuration schema version.
    #[serde(default = "MatchConfig::default_version")]
    pub version: String,
    /// How model and symptom text is normalized before comparison.
    #[serde(default)]
    pub normalize: NormalizeConfig,
    /// Model values meaning "any model". Compared after normalization.
    #[serde(default = "MatchConfig::default_wildcard_models")]
    pub wildcard_models: Vec<String>,
    /// Points for a wildcard-model reference.
    #[serde(default = "MatchConfig::default_wildcard_score")]
    pub wildcard_score: u32,
    /// Points when either model string contains the other.
    #[serde(default = "MatchConfig::default_model_score")]
    pub model_score: u32,
    /// Points per reference keyword found in the input symptom.
    #[serde(default = "MatchConfig::default_keyword_score")]
    pub keyword_score: u32,
    /// Keywords shorter than this many characters are ignored.
    #[serde(default = "MatchConfig::default_min_keyword_chars")]
    pub min_keyword_chars: usize,
    /// Odometer proximity bands, tightest first.
    #[serde(default = "MatchConfig::default_mileage_bands")]
    pub mileage_bands: Vec<MileageBand>,
    /// Maximum number of candidates returned.
    #[serde(default = "MatchConfig::default_max_results")]
    pub max_results: usize,
    /// Whether to attach a [`ScoreBreakdown`] to each candidate.
    #[serde(default)]
    pub explain: bool,
}

impl MatchConfig {
    pub(crate) fn default_version() -> String {
        "v1".to_string()
    }

    pub(crate) fn default_wildcard_models() -> Vec<String> {
        DEFAULT_WILDCARD_MODELS
            .iter()
            .map(|alias| alias.to_string())
            .collect()
    }

    pub(crate) fn default_wildcard_score() -> u32 {
        10
    }

    pub(crate) fn default_model_score() -> u32 {
        40
    }

    pub(crate) fn default_keyword_score() -> u32 {
        30
    }

    pub(crate) fn default_min_keyword_chars() -> usize {
        2
    }

    pub(crate) fn default_mileage_bands() -> Vec<MileageBand> {
        vec![
            MileageBand {
                max_diff: 5_000,
                score: 20,
            },
            MileageBand {
                max_diff: 15_000,
                score: 10,
            },
        ]
    }

    pub(crate) fn default_max_results() -> usize {
        3
    }

    /// Validate the configuration before building a matcher.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.version.trim().is_empty() {
            return Err(MatchError::InvalidConfig(
                "config.version must not be empty".into(),
            ));
        }
        self.normalize.validate()?;
        if self.max_results == 0 {
            return Err(MatchError::InvalidConfig(
                "max_results must be greater than zero".into(),
            ));
        }
        if self.min_keyword_chars == 0 {
            return Err(MatchError::InvalidConfig(
                "min_keyword_chars must be greater than zero".into(),
            ));
        }
        if self
            .wildcard_models
            .iter()
            .any(|alias| alias.trim().is_empty())
        {
            return Err(MatchError::InvalidConfig(
                "wildcard_models must not contain blank entries".into(),
            ));
        }
        if self.mileage_bands.is_empty() {
            return Err(MatchError::InvalidConfig(
                "mileage_bands must not be empty".into(),
            ));
        }
        if self
            .mileage_bands
            .windows(2)
            .any(|pair| pair[0].max_diff >= pair[1].max_diff)
        {
            return Err(MatchError::InvalidConfig(
                "mileage_bands must be sorted by strictly increasing max_diff".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            normalize: NormalizeConfig::default(),
            wildcard_models: Self::default_wildcard_models(),
            wildcard_score: Self::default_wildcard_score(),
            model_score: Self::default_model_score(),
            keyword_score: Self::default_keyword_score(),
            min_keyword_chars: Self::default_min_keyword_chars(),
            mileage_bands: Self::default_mileage_bands(),
            max_results: Self::default_max_results(),
            explain: false,
        }
    }
}

/// Errors produced by the matching layer.
///
/// Scoring itself never fails; only building a matcher from a bad
/// configuration does.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Invalid scoring configuration.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    /// Invalid normalization settings.
    #[error("normalization error: {0}")]
    Canonical(#[from] CanonicalError),
}
