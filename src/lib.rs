//! Workspace umbrella crate for the vehicle inspection assistant.
//!
//! This crate stitches together the reference matcher and the checklist
//! corrector so callers can drive a whole inspection report through a single
//! [`Engine`] built from one YAML configuration.

pub mod config;
pub mod report;

pub use canonical::{CanonicalError, NormalizeConfig, normalize_field, parse_digits};
pub use matcher::{
    CurrentInput, MatchConfig, MatchError, MatchMetrics, Matcher, MileageBand, ReferenceRecord,
    ScoreBreakdown, ScoredCandidate, SheetChecklistItem, recommend, set_match_metrics,
};
pub use rules::{
    CHECKLIST_LEN, Checklist, ChecklistEntry, ChecklistSlot, Correction, CorrectionReport,
    Corrector, MemoCatalog, RuleConfig, RuleError, RuleFiring, RuleId, Status, VehicleMetadata,
    apply_rules,
};

pub use crate::config::{ConfigLoadError, EngineConfig};
pub use crate::report::WorkingReport;

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while building an [`Engine`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("matcher: {0}")]
    Match(#[from] MatchError),
    #[error("rules: {0}")]
    Rules(#[from] RuleError),
    #[error("config: {0}")]
    Config(#[from] ConfigLoadError),
}

/// Metrics observer for engine calls.
pub trait PipelineMetrics: Send + Sync {
    fn record_recommend(&self, latency: Duration, hit_count: usize);
    fn record_correct(&self, latency: Duration, fired: usize);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_recommend(self, hit_count: usize) {
        self.recorder
            .record_recommend(self.start.elapsed(), hit_count);
    }

    fn record_correct(self, fired: usize) {
        self.recorder.record_correct(self.start.elapsed(), fired);
    }
}

/// A corrected report and what the rules changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportCorrection {
    pub report: WorkingReport,
    pub corrections: CorrectionReport,
}

/// Matcher and corrector configured together.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    matcher: Matcher,
    corrector: Corrector,
}

impl Engine {
    /// Build both engines from a loaded configuration.
    pub fn new(cfg: &EngineConfig) -> Result<Self, EngineError> {
        cfg.validate()?;
        Ok(Self {
            matcher: Matcher::new(cfg.to_match_config())?,
            corrector: Corrector::new(cfg.to_rule_config())?,
        })
    }

    /// Load a YAML configuration file and build both engines from it.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, EngineError> {
        Self::new(&EngineConfig::from_file(path)?)
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn corrector(&self) -> &Corrector {
        &self.corrector
    }

    /// Rank `catalog` against the values typed into `report`.
    pub fn recommend(
        &self,
        catalog: &[ReferenceRecord],
        report: &WorkingReport,
    ) -> Vec<ScoredCandidate> {
        let span = MetricsSpan::start();
        let hits = self.matcher.recommend(catalog, &report.input());
        if let Some(span) = span {
            span.record_recommend(hits.len());
        }
        hits
    }

    /// Correct the report's checklist as of the current year.
    pub fn correct(&self, report: &WorkingReport) -> ReportCorrection {
        let span = MetricsSpan::start();
        let correction = self.corrector.correct(&report.vehicle(), &report.checklist);
        self.finish_correction(report, correction, span)
    }

    /// Correct the report's checklist as of `current_year`.
    pub fn correct_for_year(&self, report: &WorkingReport, current_year: i32) -> ReportCorrection {
        let span = MetricsSpan::start();
        let correction =
            self.corrector
                .correct_for_year(&report.vehicle(), &report.checklist, current_year);
        self.finish_correction(report, correction, span)
    }

    fn finish_correction(
        &self,
        report: &WorkingReport,
        correction: Correction,
        span: Option<MetricsSpan>,
    ) -> ReportCorrection {
        if let Some(span) = span {
            span.record_correct(correction.report.fired.len());
        }
        let mut corrected = report.clone();
        corrected.checklist = correction.checklist;
        ReportCorrection {
            report: corrected,
            corrections: correction.report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> WorkingReport {
        WorkingReport {
            vehicle_model: "SM5 2.0".into(),
            symptom: "엔진 떨림 심함".into(),
            current_mileage: "62000".into(),
            last_mileage: "50000".into(),
            year: "2016".into(),
            ..WorkingReport::default()
        }
    }

    #[test]
    fn engine_recommends_from_report_fields() {
        let catalog = vec![
            ReferenceRecord::new("전차종", "와이퍼", "10000"),
            ReferenceRecord::new("SM5", "엔진 떨림", "60000"),
        ];

        let hits = Engine::default().recommend(&catalog, &report());

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].record.vehicle_model, "SM5");
        assert_eq!(hits[0].score, 120);
        assert_eq!(hits[1].score, 10);
    }

    #[test]
    fn engine_corrects_report_checklist_only() {
        let original = report();
        let out = Engine::default().correct_for_year(&original, 2026);

        assert_eq!(out.report.checklist[ChecklistSlot::EngineOil].status, Some(Status::Bad));
        assert_eq!(out.report.checklist[ChecklistSlot::Belts].status, Some(Status::Normal));
        assert_eq!(out.report.vehicle_model, original.vehicle_model);
        assert_eq!(out.corrections.vehicle_age, 10);
        assert_eq!(original, report());
    }

    #[test]
    fn engine_rejects_invalid_config() {
        let mut cfg = EngineConfig::default();
        cfg.matcher.max_results = 0;
        assert!(matches!(Engine::new(&cfg), Err(EngineError::Config(_))));
    }

    #[derive(Default)]
    struct CountingMetrics {
        events: RwLock<Vec<(&'static str, usize)>>,
    }

    impl CountingMetrics {
        fn snapshot(&self) -> Vec<(&'static str, usize)> {
            self.events.read().unwrap().clone()
        }
    }

    impl PipelineMetrics for CountingMetrics {
        fn record_recommend(&self, _latency: Duration, hit_count: usize) {
            self.events.write().unwrap().push(("recommend", hit_count));
        }

        fn record_correct(&self, _latency: Duration, fired: usize) {
            self.events.write().unwrap().push(("correct", fired));
        }
    }

    #[test]
    fn metrics_recorder_tracks_engine_calls() {
        let metrics = Arc::new(CountingMetrics::default());
        set_pipeline_metrics(Some(metrics.clone()));

        let engine = Engine::default();
        let catalog = vec![ReferenceRecord::new("SM5", "엔진", "0")];
        let _ = engine.recommend(&catalog, &report());
        let _ = engine.correct_for_year(&report(), 2026);

        set_pipeline_metrics(None);

        let events = metrics.snapshot();
        assert!(events.contains(&("recommend", 1)));
        // Oil watch, oil overdue, belts, coolant.
        assert!(events.contains(&("correct", 4)));
    }
}
