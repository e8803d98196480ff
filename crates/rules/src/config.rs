//! Thresholds and memo texts for the maintenance rules.
//!
//! Defaults reproduce the shop's fixed policy: oil watch above 7,000 since
//! the last service, oil change above 10,000, age-based wear checks from the
//! eighth year, and a brake pad check in the 3,000 after every 40,000.

use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Memo texts written by the rules and used when normalizing memos.
///
/// Kept as data so the shop locale can be swapped without touching the rules.
/// Fields left out of a configuration fall back to the Korean catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MemoCatalog {
    pub oil_change_approaching: String,
    pub oil_change_overdue: String,
    pub belt_age_check: String,
    pub coolant_age_check: String,
    pub brake_pad_cycle_check: String,
    /// Default memo for a `Bad` entry with no memo of its own.
    pub default_bad: String,
    /// Default memo for a `Normal` entry with no memo of its own.
    pub default_normal: String,
    /// Default memo for a `Good` entry with no memo of its own.
    pub default_good: String,
    /// Generic memos treated as "no memo" and replaced by the status default.
    pub placeholders: Vec<String>,
}

impl MemoCatalog {
    /// The shop's Korean texts.
    pub fn korean() -> Self {
        Self {
            oil_change_approaching: "교환 주기 근접".into(),
            oil_change_overdue: "즉시 교환 권장".into(),
            belt_age_check: "연식 기반 노후 점검".into(),
            coolant_age_check: "냉각수 상태 확인".into(),
            brake_pad_cycle_check: "마모도 정밀 체크".into(),
            default_bad: "즉시 정비 요망".into(),
            default_normal: "상태 주의/관찰".into(),
            default_good: "정상 범위".into(),
            placeholders: vec!["정상 범위".into(), "정상".into()],
        }
    }

    /// English texts. Several exceed the memo display limit and will be
    /// shortened when a checklist is normalized.
    pub fn english() -> Self {
        Self {
            oil_change_approaching: "approaching change interval".into(),
            oil_change_overdue: "immediate change recommended".into(),
            belt_age_check: "age-based wear check".into(),
            coolant_age_check: "verify coolant condition".into(),
            brake_pad_cycle_check: "precise wear check".into(),
            default_bad: "immediate service required".into(),
            default_normal: "monitor condition".into(),
            default_good: "normal range".into(),
            placeholders: vec!["normal range".into(), "normal".into()],
        }
    }

    pub fn is_placeholder(&self, memo: &str) -> bool {
        self.placeholders.iter().any(|placeholder| placeholder == memo)
    }
}

impl Default for MemoCatalog {
    fn default() -> Self {
        Self::korean()
    }
}

/// Configuration for the checklist corrector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleConfig {
    /// Configuration schema version.
    #[serde(default = "RuleConfig::default_version")]
    pub version: String,
    /// Engine oil moves from good to normal when the distance since the last
    /// service exceeds this.
    #[serde(default = "RuleConfig::default_oil_watch_diff")]
    pub oil_watch_diff: i64,
    /// Engine oil is forced to bad when the distance since the last service
    /// exceeds this.
    #[serde(default = "RuleConfig::default_oil_change_diff")]
    pub oil_change_diff: i64,
    /// Belts and coolant get an age check from this many years on.
    #[serde(default = "RuleConfig::default_aged_vehicle_years")]
    pub aged_vehicle_years: i64,
    /// Assumed age when the model year is unknown.
    #[serde(default = "RuleConfig::default_unknown_vehicle_age")]
    pub unknown_vehicle_age: i64,
    /// Brake pads get a wear check after every multiple of this distance.
    #[serde(default = "RuleConfig::default_brake_pad_interval")]
    pub brake_pad_interval: u64,
    /// Distance after each multiple during which the check applies.
    #[serde(default = "RuleConfig::default_brake_pad_window")]
    pub brake_pad_window: u64,
    /// Memos longer than this many characters are shortened.
    #[serde(default = "RuleConfig::default_memo_max_chars")]
    pub memo_max_chars: usize,
    /// Characters kept from a shortened memo, before the ellipsis.
    #[serde(default = "RuleConfig::default_memo_keep_chars")]
    pub memo_keep_chars: usize,
    #[serde(default = "RuleConfig::default_ellipsis")]
    pub ellipsis: String,
    #[serde(default)]
    pub memos: MemoCatalog,
}

impl RuleConfig {
    pub(crate) fn default_version() -> String {
        "v1".to_string()
    }

    pub(crate) fn default_oil_watch_diff() -> i64 {
        7_000
    }

    pub(crate) fn default_oil_change_diff() -> i64 {
        10_000
    }

    pub(crate) fn default_aged_vehicle_years() -> i64 {
        8
    }

    pub(crate) fn default_unknown_vehicle_age() -> i64 {
        5
    }

    pub(crate) fn default_brake_pad_interval() -> u64 {
        40_000
    }

    pub(crate) fn default_brake_pad_window() -> u64 {
        3_000
    }

    pub(crate) fn default_memo_max_chars() -> usize {
        20
    }

    pub(crate) fn default_memo_keep_chars() -> usize {
        17
    }

    pub(crate) fn default_ellipsis() -> String {
        "...".to_string()
    }

    /// Validate the configuration before building a corrector.
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.version.trim().is_empty() {
            return Err(RuleError::InvalidConfig(
                "config.version must not be empty".into(),
            ));
        }
        if self.brake_pad_interval == 0 {
            return Err(RuleError::InvalidConfig(
                "brake_pad_interval must be greater than zero".into(),
            ));
        }
        if self.brake_pad_window > self.brake_pad_interval {
            return Err(RuleError::InvalidConfig(
                "brake_pad_window must not exceed brake_pad_interval".into(),
            ));
        }
        if self.memo_max_chars == 0 {
            return Err(RuleError::InvalidConfig(
                "memo_max_chars must be greater than zero".into(),
            ));
        }
        if self.memo_keep_chars > self.memo_max_chars {
            return Err(RuleError::InvalidConfig(
                "memo_keep_chars must not exceed memo_max_chars".into(),
            ));
        }
        if self.unknown_vehicle_age < 0 {
            return Err(RuleError::InvalidConfig(
                "unknown_vehicle_age must be >= 0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            oil_watch_diff: Self::default_oil_watch_diff(),
            oil_change_diff: Self::default_oil_change_diff(),
            aged_vehicle_years: Self::default_aged_vehicle_years(),
            unknown_vehicle_age: Self::default_unknown_vehicle_age(),
            brake_pad_interval: Self::default_brake_pad_interval(),
            brake_pad_window: Self::default_brake_pad_window(),
            memo_max_chars: Self::default_memo_max_chars(),
            memo_keep_chars: Self::default_memo_keep_chars(),
            ellipsis: Self::default_ellipsis(),
            memos: MemoCatalog::default(),
        }
    }
}
