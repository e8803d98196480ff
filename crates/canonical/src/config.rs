//! Configuration for field normalization.
//!
//! The defaults reproduce the behavior inspectors already rely on: trim
//! surrounding whitespace and lowercase. Unicode compatibility folding is
//! available but off, since enabling it changes which catalog entries match.
//!
//! # Examples
//!
//! ```rust
//! use canonical::NormalizeConfig;
//!
//! let config = NormalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(!config.normalize_unicode);
//! assert!(config.lowercase);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Controls how text fields are normalized before comparison.
///
/// Cheap to clone and serde-friendly so it can be embedded in the matcher's
/// configuration and loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// Version of the normalization behavior. Version 0 is reserved.
    #[serde(default = "NormalizeConfig::default_version")]
    pub version: u32,

    /// If true, apply Unicode NFKC before trimming and lowercasing.
    ///
    /// Folds full-width Latin (`ＳＭ５`) and decomposed Hangul jamo into their
    /// canonical forms.
    #[serde(default)]
    pub normalize_unicode: bool,

    /// If true, lowercase the trimmed text.
    #[serde(default = "NormalizeConfig::default_lowercase")]
    pub lowercase: bool,
}

impl NormalizeConfig {
    fn default_version() -> u32 {
        1
    }

    fn default_lowercase() -> bool {
        true
    }

    /// Reject reserved or unsupported settings.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            normalize_unicode: false,
            lowercase: Self::default_lowercase(),
        }
    }
}
