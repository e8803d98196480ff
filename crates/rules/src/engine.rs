use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RuleConfig;
use crate::error::RuleError;
use crate::types::{Checklist, ChecklistEntry, ChecklistSlot, Status, VehicleMetadata};

#[cfg(test)]
mod tests;

/// Identifies which maintenance rule changed a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    OilChangeApproaching,
    OilChangeOverdue,
    AgedBelts,
    AgedCoolant,
    BrakePadCycle,
}

/// One slot override performed by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFiring {
    pub rule: RuleId,
    pub slot: ChecklistSlot,
    /// Status before the rule fired; `None` if the slot had no status.
    pub previous: Option<Status>,
    pub status: Status,
}

/// Derived inputs and the overrides applied during one correction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionReport {
    pub mileage_diff: i64,
    pub vehicle_age: i64,
    pub fired: Vec<RuleFiring>,
}

/// Corrected checklist plus the report of what changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub checklist: Checklist,
    pub report: CorrectionReport,
}

/// Applies the maintenance rules and memo normalization to checklists.
#[derive(Debug, Clone, Default)]
pub struct Corrector {
    cfg: RuleConfig,
}

impl Corrector {
    /// Construct a corrector from an explicit configuration.
    pub fn new(cfg: RuleConfig) -> Result<Self, RuleError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &RuleConfig {
        &self.cfg
    }

    /// Correct `checklist` using the current calendar year (UTC).
    pub fn correct(&self, vehicle: &VehicleMetadata, checklist: &Checklist) -> Correction {
        self.correct_for_year(vehicle, checklist, Utc::now().year())
    }

    /// Correct `checklist` as of `current_year`.
    ///
    /// The input checklist is left untouched; rules run in a fixed order so a
    /// later rule may override an earlier one on the same slot. Rules never
    /// touch a slot the checklist did not supply, and only an explicit `Good`
    /// is downgraded. Normalization then fills every slot.
    pub fn correct_for_year(
        &self,
        vehicle: &VehicleMetadata,
        checklist: &Checklist,
        current_year: i32,
    ) -> Correction {
        let cfg = &self.cfg;
        let memos = &cfg.memos;
        let mileage_diff = vehicle.mileage_diff();
        let vehicle_age = vehicle.vehicle_age(current_year, cfg.unknown_vehicle_age);
        let current = vehicle.current();

        let mut pass = RulePass {
            checklist: checklist.clone(),
            fired: Vec::new(),
        };

        if mileage_diff > cfg.oil_watch_diff {
            pass.downgrade_good(
                RuleId::OilChangeApproaching,
                ChecklistSlot::EngineOil,
                &memos.oil_change_approaching,
            );
        }
        if mileage_diff > cfg.oil_change_diff {
            pass.force(
                RuleId::OilChangeOverdue,
                ChecklistSlot::EngineOil,
                ChecklistEntry::new(Status::Bad, memos.oil_change_overdue.as_str()),
            );
        }
        if vehicle_age >= cfg.aged_vehicle_years {
            pass.downgrade_good(RuleId::AgedBelts, ChecklistSlot::Belts, &memos.belt_age_check);
            pass.downgrade_good(
                RuleId::AgedCoolant,
                ChecklistSlot::Coolant,
                &memos.coolant_age_check,
            );
        }
        if current > 0 && current % cfg.brake_pad_interval < cfg.brake_pad_window {
            pass.downgrade_good(
                RuleId::BrakePadCycle,
                ChecklistSlot::BrakePads,
                &memos.brake_pad_cycle_check,
            );
        }

        let mut corrected = pass.checklist;
        self.normalize_in_place(&mut corrected);

        tracing::debug!(
            mileage_diff,
            vehicle_age,
            fired = pass.fired.len(),
            "applied maintenance rules"
        );

        Correction {
            checklist: corrected,
            report: CorrectionReport {
                mileage_diff,
                vehicle_age,
                fired: pass.fired,
            },
        }
    }

    /// Run only the memo normalization pass.
    pub fn normalize(&self, checklist: &Checklist) -> Checklist {
        let mut normalized = checklist.clone();
        self.normalize_in_place(&mut normalized);
        normalized
    }

    fn normalize_in_place(&self, checklist: &mut Checklist) {
        for slot in checklist.slots_mut().iter_mut() {
            let mut entry = slot.take().unwrap_or_default();
            let status = entry.status.unwrap_or_default();
            if entry.memo.is_empty() || self.cfg.memos.is_placeholder(&entry.memo) {
                entry.memo = self.default_memo(status).to_string();
            }
            if let Some(shortened) = self.shorten(&entry.memo) {
                entry.memo = shortened;
            }
            entry.status = Some(status);
            *slot = Some(entry);
        }
    }

    fn default_memo(&self, status: Status) -> &str {
        let memos = &self.cfg.memos;
        match status {
            Status::Bad => &memos.default_bad,
            Status::Normal => &memos.default_normal,
            Status::Good => &memos.default_good,
        }
    }

    fn shorten(&self, memo: &str) -> Option<String> {
        if memo.chars().count() <= self.cfg.memo_max_chars {
            return None;
        }
        let mut shortened: String = memo.chars().take(self.cfg.memo_keep_chars).collect();
        shortened.push_str(&self.cfg.ellipsis);
        Some(shortened)
    }
}

/// Working state for one correction.
struct RulePass {
    checklist: Checklist,
    fired: Vec<RuleFiring>,
}

impl RulePass {
    /// Move an explicitly `Good` slot to `Normal` with `memo`; other statuses,
    /// unset statuses and unsupplied slots are left alone.
    fn downgrade_good(&mut self, rule: RuleId, slot: ChecklistSlot, memo: &str) {
        let is_good = self
            .checklist
            .get(slot)
            .is_some_and(|entry| entry.status == Some(Status::Good));
        if is_good {
            self.force(rule, slot, ChecklistEntry::new(Status::Normal, memo));
        }
    }

    /// Overwrite a supplied slot whatever its status.
    fn force(&mut self, rule: RuleId, slot: ChecklistSlot, entry: ChecklistEntry) {
        let Some(previous) = self.checklist.get(slot).map(|current| current.status) else {
            return;
        };
        let status = entry.status.unwrap_or_default();
        tracing::debug!(
            ?rule,
            item = slot.label(),
            previous = previous.map_or("unset", Status::as_str),
            %status,
            "maintenance rule fired"
        );
        self.fired.push(RuleFiring {
            rule,
            slot,
            previous,
            status,
        });
        self.checklist.set(slot, entry);
    }
}

/// Correct `checklist` for `vehicle` with the default rules and the current year.
pub fn apply_rules(vehicle: &VehicleMetadata, checklist: &Checklist) -> Checklist {
    Corrector::default().correct(vehicle, checklist).checklist
}
