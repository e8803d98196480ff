//! # Reference Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` ranks a catalog of historical inspection records against what an
//! inspector has typed so far (vehicle model, symptom, odometer) and returns
//! the few records most worth reusing as a starting point.
//!
//! ## Scoring
//!
//! Each reference record earns points from three independent terms:
//!
//! - **Model**: a wildcard-model record (`전차종` / `all`) earns a small flat
//!   bonus; a record whose model contains, or is contained in, the input
//!   model earns the large bonus.
//! - **Symptom**: each reference keyword (split on whitespace and commas,
//!   single characters ignored) found inside the input symptom earns points.
//! - **Mileage**: odometer readings within 5,000 or 15,000 of each other earn
//!   a proximity bonus.
//!
//! Records scoring zero are dropped; the rest are sorted by descending score
//! (ties keep catalog order) and truncated to the configured limit.
//!
//! ## Core Types
//!
//! - [`ReferenceRecord`]: catalog row; unknown columns pass through.
//! - [`CurrentInput`]: the live form values.
//! - [`ScoredCandidate`]: a record plus its `score` (and optional breakdown).
//! - [`MatchConfig`]: weights, thresholds and limits.
//! - [`Matcher`]: validated engine instance.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{recommend, CurrentInput, ReferenceRecord};
//!
//! let catalog = vec![ReferenceRecord::new("SM5", "엔진 떨림", "50000")];
//! let input = CurrentInput::new("SM5", "엔진 떨림 심함", "52000");
//!
//! let hits = recommend(&catalog, &input);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].score, 120);
//! ```
//!
//! ## Observability
//!
//! Install a [`MatchMetrics`] implementation via [`set_match_metrics`] to record
//! per-call latency and hit counts. Ranking also emits a `tracing` debug event.

pub mod engine;
pub mod metrics;
pub mod types;

pub use crate::engine::{recommend, Matcher};
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::types::{
    CurrentInput, MatchConfig, MatchError, MileageBand, ModelPattern, ReferenceRecord,
    ScoreBreakdown, ScoredCandidate, SheetChecklistItem, DEFAULT_WILDCARD_MODELS,
};
