//! Lenient numeric parsing for odometer and year fields.
//!
//! Spreadsheet cells arrive as `"52,000"`, `"52000km"`, `"약 5만"` or plain
//! numbers. Neither parser here ever fails: the odometer parser keeps every
//! ASCII digit and the year parser reads a leading integer.

/// Strip every non-digit character and parse the rest as a base-10 integer.
///
/// An empty digit sequence parses to `0`. Values that do not fit in `u64`
/// saturate at `u64::MAX`.
///
/// ```rust
/// use canonical::parse_digits;
///
/// assert_eq!(parse_digits("52,000 km"), 52_000);
/// assert_eq!(parse_digits("unknown"), 0);
/// assert_eq!(parse_digits(""), 0);
/// ```
pub fn parse_digits(text: &str) -> u64 {
    text.bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
        })
}

/// Parse a leading integer the way a lenient form field would.
///
/// Leading whitespace is skipped, an optional sign is honored, and digits are
/// read until the first non-digit. Returns `None` when no digit follows.
///
/// ```rust
/// use canonical::parse_leading_int;
///
/// assert_eq!(parse_leading_int("2015년식"), Some(2015));
/// assert_eq!(parse_leading_int("  -3"), Some(-3));
/// assert_eq!(parse_leading_int("년식 미상"), None);
/// ```
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let rest = text.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let digits: &str = {
        let end = rest
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}
