//! The report an inspector is filling in, and how a recommendation merges into it.

use matcher::{CurrentInput, ScoredCandidate};
use rules::{Checklist, ChecklistEntry, Status, VehicleMetadata};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Working copy of an inspection report.
///
/// Field names follow the sheet columns. Columns this crate does not use are
/// kept in `extra` so a report read from JSON writes back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingReport {
    #[serde(default, with = "canonical::loose_text")]
    pub vehicle_model: String,
    #[serde(default, with = "canonical::loose_text")]
    pub symptom: String,
    #[serde(default, with = "canonical::loose_text")]
    pub current_mileage: String,
    #[serde(default, with = "canonical::loose_text")]
    pub last_mileage: String,
    #[serde(default, with = "canonical::loose_text")]
    pub year: String,
    #[serde(default, with = "canonical::loose_text")]
    pub fuel_type: String,
    #[serde(default, with = "canonical::loose_text")]
    pub main_content: String,
    #[serde(default, with = "canonical::loose_text")]
    pub special_notes: String,
    #[serde(default)]
    pub checklist: Checklist,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl WorkingReport {
    /// The matcher's view of this report.
    pub fn input(&self) -> CurrentInput {
        CurrentInput::new(
            self.vehicle_model.as_str(),
            self.symptom.as_str(),
            self.current_mileage.as_str(),
        )
    }

    /// The corrector's view of this report.
    pub fn vehicle(&self) -> VehicleMetadata {
        VehicleMetadata::new(
            self.current_mileage.as_str(),
            self.last_mileage.as_str(),
            self.year.as_str(),
        )
    }

    /// Merge a chosen recommendation into a copy of this report.
    ///
    /// Work content, special notes and fuel type are taken from the candidate
    /// only when it has a non-empty value. A candidate checklist replaces the
    /// working one, with sheet labels mapped onto statuses; without one the
    /// working checklist is kept. Vehicle fields are never touched.
    pub fn apply_candidate(&self, candidate: &ScoredCandidate) -> WorkingReport {
        let record = &candidate.record;
        let mut merged = self.clone();

        if let Some(text) = non_empty(&record.main_content) {
            merged.main_content = text.to_string();
        }
        if let Some(text) = non_empty(&record.special_notes) {
            merged.special_notes = text.to_string();
        }
        if let Some(text) = non_empty(&record.fuel_type) {
            merged.fuel_type = text.to_string();
        }
        if let Some(items) = &record.checklist {
            merged.checklist = Checklist::from_entries(items.iter().map(|item| {
                ChecklistEntry::new(Status::from_label(&item.status), item.memo.as_str())
            }));
        }

        tracing::debug!(
            score = candidate.score,
            replaced_checklist = record.checklist.is_some(),
            "applied recommendation to working report"
        );
        merged
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}
