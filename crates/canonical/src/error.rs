use thiserror::Error;

/// Errors that can occur while configuring normalization.
///
/// Normalizing and parsing never fail; only a bad configuration does.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
