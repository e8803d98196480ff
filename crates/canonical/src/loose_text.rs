//! Serde helper for cells that may hold either text or a number.
//!
//! Odometer and year columns come back from the sheet as `"52000"`, `52000`,
//! `52000.0` or `null` depending on how the cell was formatted. Fields using
//! this module always land as a `String`, so downstream parsing sees a single
//! shape.
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Row {
//!     #[serde(default, with = "canonical::loose_text")]
//!     mileage: String,
//! }
//!
//! let row: Row = serde_json::from_str(r#"{"mileage": 52000}"#).unwrap();
//! assert_eq!(row.mileage, "52000");
//! ```

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Flag(bool),
}

/// Serialize the field back as plain text.
pub fn serialize<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value)
}

/// Deserialize a string, number, boolean or null into text.
///
/// Booleans and nulls become an empty string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = Option::<Cell>::deserialize(deserializer)?;
    Ok(match cell {
        Some(Cell::Text(text)) => text,
        Some(Cell::Unsigned(n)) => n.to_string(),
        Some(Cell::Signed(n)) => n.to_string(),
        Some(Cell::Float(n)) => n.to_string(),
        Some(Cell::Flag(_)) | None => String::new(),
    })
}
