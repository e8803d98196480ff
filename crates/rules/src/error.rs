use thiserror::Error;

/// Errors produced by the rules layer.
///
/// Applying rules never fails; only building a corrector from a bad
/// configuration does.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("invalid rule config: {0}")]
    InvalidConfig(String),
}
