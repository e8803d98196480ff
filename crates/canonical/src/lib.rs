//! Inspection field normalization layer.
//!
//! Everything the matcher and the rule corrector compare goes through this
//! crate first, so both engines agree on what "the same model" or "the same
//! mileage" means.
//!
//! ## What we do
//!
//! - Field normalization: optional NFKC, trim, lowercase
//! - Digit-stripping numeric parsing (`"52,000 km"` → `52000`)
//! - Leading-integer parsing for year-like fields (`"2015년"` → `2015`)
//! - Keyword splitting on whitespace and commas
//! - A serde helper that accepts either strings or numbers for free-text
//!   numeric fields coming from a spreadsheet
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Malformed input degrades to
//! an empty string or zero instead of an error.

mod config;
mod error;
mod field;
pub mod loose_text;
mod numeric;
mod token;

pub use crate::config::NormalizeConfig;
pub use crate::error::CanonicalError;
pub use crate::field::{normalize_field, normalize_field_with};
pub use crate::numeric::{parse_digits, parse_leading_int};
pub use crate::token::split_keywords;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_fields_compare_equal() {
        let cfg = NormalizeConfig::default();
        assert_eq!(normalize_field_with("  SM5 ", &cfg), normalize_field("sm5"));
    }

    #[test]
    fn mileage_and_keywords_from_same_record() {
        let symptom = normalize_field(" 엔진 떨림, 소음 ");
        let keywords: Vec<&str> = split_keywords(&symptom).collect();
        assert_eq!(keywords, vec!["엔진", "떨림", "소음"]);
        assert_eq!(parse_digits("52,000km"), 52_000);
    }
}
