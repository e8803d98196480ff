use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

use crate::config::NormalizeConfig;

/// Normalize a text field with the default configuration: trim, then lowercase.
///
/// ```rust
/// use canonical::normalize_field;
///
/// assert_eq!(normalize_field("  SM5 "), "sm5");
/// assert_eq!(normalize_field("   "), "");
/// ```
pub fn normalize_field(text: &str) -> String {
    normalize_field_with(text, &NormalizeConfig::default())
}

/// Normalize a text field with an explicit configuration.
///
/// Unicode folding (when enabled) runs first since it can turn
/// compatibility spaces into ASCII ones that trimming must then remove.
pub fn normalize_field_with(text: &str, cfg: &NormalizeConfig) -> String {
    let folded: Cow<str> = if cfg.normalize_unicode {
        Cow::Owned(text.nfkc().collect::<String>())
    } else {
        Cow::Borrowed(text)
    };

    let trimmed = folded.trim();
    if cfg.lowercase {
        trimmed.to_lowercase()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize_field("\t New SM5\n"), "new sm5");
    }

    #[test]
    fn interior_whitespace_is_kept() {
        assert_eq!(normalize_field(" 엔진  떨림 "), "엔진  떨림");
    }

    #[test]
    fn lowercase_can_be_disabled() {
        let cfg = NormalizeConfig {
            lowercase: false,
            ..Default::default()
        };
        assert_eq!(normalize_field_with(" QM6 ", &cfg), "QM6");
    }

    #[test]
    fn unicode_folding_handles_full_width_input() {
        let cfg = NormalizeConfig {
            normalize_unicode: true,
            ..Default::default()
        };
        assert_eq!(normalize_field_with("\u{3000}ＳＭ５\u{3000}", &cfg), "sm5");
        assert_eq!(normalize_field("ＳＭ５"), "ｓｍ５");
    }
}
