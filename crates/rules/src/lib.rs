//! # Checklist Corrector (`rules`)
//!
//! Adjusts a 12-slot inspection checklist according to fixed maintenance
//! thresholds, then normalizes memo text for display.
//!
//! ## Rules, in order
//!
//! 1. More than 7,000 since the last service: engine oil `good` → `normal`.
//! 2. More than 10,000 since the last service: engine oil → `bad`, always.
//! 3. Vehicle eight years or older: belts and coolant `good` → `normal`.
//! 4. Odometer within 3,000 past a multiple of 40,000: brake pads
//!    `good` → `normal`.
//!
//! After the rules, empty or generic memos are replaced with a status
//! default and memos over 20 characters are cut to 17 plus `...`.
//!
//! The corrector never fails and never mutates its input: it borrows the
//! checklist and returns a new one.
//!
//! ```
//! use rules::{Checklist, ChecklistSlot, Corrector, Status, VehicleMetadata};
//!
//! let vehicle = VehicleMetadata::new("62000", "50000", "2020");
//! let corrected = Corrector::default()
//!     .correct_for_year(&vehicle, &Checklist::new(), 2026)
//!     .checklist;
//!
//! assert_eq!(corrected[ChecklistSlot::EngineOil].status, Some(Status::Bad));
//! assert_eq!(corrected[ChecklistSlot::EngineOil].memo, "즉시 교환 권장");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod types;

pub use crate::config::{MemoCatalog, RuleConfig};
pub use crate::engine::{apply_rules, Correction, CorrectionReport, Corrector, RuleFiring, RuleId};
pub use crate::error::RuleError;
pub use crate::types::{
    Checklist, ChecklistEntry, ChecklistSlot, Status, VehicleMetadata, CHECKLIST_LEN,
};
