use std::time::Instant;

use canonical::{normalize_field_with, parse_digits, split_keywords};

use crate::metrics::metrics_recorder;
use crate::types::{
    CurrentInput, MatchConfig, MatchError, ModelPattern, ReferenceRecord, ScoreBreakdown,
    ScoredCandidate,
};


/// Ranks reference records against the inspector's current input.
///
/// A matcher holds only its validated configuration, so one instance can be
/// shared freely across threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    cfg: MatchConfig,
    wildcard_aliases: Vec<String>,
}

/// Current input, normalized once per call.
struct Query {
    model: String,
    symptom: String,
    mileage: u64,
}

impl Matcher {
    /// Construct a matcher from an explicit configuration.
    pub fn new(cfg: MatchConfig) -> Result<Self, MatchError> {
        cfg.validate()?;
        Ok(Self::from_validated(cfg))
    }

    fn from_validated(cfg: MatchConfig) -> Self {
        let wildcard_aliases = cfg
            .wildcard_models
            .iter()
            .map(|alias| normalize_field_with(alias, &cfg.normalize))
            .collect();
        Self {
            cfg,
            wildcard_aliases,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    fn query(&self, input: &CurrentInput) -> Query {
        Query {
            model: normalize_field_with(&input.vehicle_model, &self.cfg.normalize),
            symptom: normalize_field_with(&input.symptom, &self.cfg.normalize),
            mileage: parse_digits(&input.current_mileage),
        }
    }

    /// Score a single reference record against the input.
    pub fn score(&self, record: &ReferenceRecord, input: &CurrentInput) -> ScoreBreakdown {
        self.score_query(record, &self.query(input))
    }

    fn score_query(&self, record: &ReferenceRecord, query: &Query) -> ScoreBreakdown {
        let ref_model = normalize_field_with(&record.vehicle_model, &self.cfg.normalize);
        let ref_symptom = normalize_field_with(&record.symptom, &self.cfg.normalize);
        let ref_mileage = parse_digits(&record.current_mileage);

        let model = self.model_score(&ref_model, &query.model);
        let matched_keywords = self.matched_keywords(&ref_symptom, &query.symptom);
        let symptom = self
            .cfg
            .keyword_score
            .saturating_mul(u32::try_from(matched_keywords.len()).unwrap_or(u32::MAX));
        let mileage = self.mileage_score(ref_mileage, query.mileage);

        ScoreBreakdown {
            model,
            symptom,
            mileage,
            matched_keywords,
        }
    }

    fn model_score(&self, ref_model: &str, input_model: &str) -> u32 {
        match ModelPattern::classify(ref_model, &self.wildcard_aliases) {
            ModelPattern::Any => self.cfg.wildcard_score,
            ModelPattern::Named(named) => {
                if !input_model.is_empty()
                    && (input_model.contains(named.as_str()) || named.contains(input_model))
                {
                    self.cfg.model_score
                } else {
                    0
                }
            }
            ModelPattern::Unspecified => 0,
        }
    }

    fn matched_keywords(&self, ref_symptom: &str, input_symptom: &str) -> Vec<String> {
        if ref_symptom.is_empty() || input_symptom.is_empty() {
            return Vec::new();
        }
        split_keywords(ref_symptom)
            .filter(|keyword| keyword.chars().count() >= self.cfg.min_keyword_chars)
            .filter(|keyword| input_symptom.contains(keyword))
            .map(str::to_string)
            .collect()
    }

    fn mileage_score(&self, ref_mileage: u64, input_mileage: u64) -> u32 {
        if ref_mileage == 0 || input_mileage == 0 {
            return 0;
        }
        let diff = ref_mileage.abs_diff(input_mileage);
        self.cfg
            .mileage_bands
            .iter()
            .find(|band| diff <= band.max_diff)
            .map_or(0, |band| band.score)
    }

    /// Rank `references` against `input` and return the best candidates.
    ///
    /// Candidates with a zero score are dropped, the rest are ordered by
    /// descending score with ties kept in catalog order, and at most
    /// `max_results` are returned. An empty catalog yields an empty result.
    pub fn recommend(
        &self,
        references: &[ReferenceRecord],
        input: &CurrentInput,
    ) -> Vec<ScoredCandidate> {
        let start = Instant::now();
        let query = self.query(input);

        let mut candidates: Vec<ScoredCandidate> = references
            .iter()
            .filter_map(|record| {
                let breakdown = self.score_query(record, &query);
                let score = breakdown.total();
                (score > 0).then(|| ScoredCandidate {
                    record: record.clone(),
                    score,
                    breakdown: self.cfg.explain.then_some(breakdown),
                })
            })
            .collect();

        let qualified = candidates.len();
        // `sort_by` is stable: equal scores keep catalog order.
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates.truncate(self.cfg.max_results);

        tracing::debug!(
            catalog = references.len(),
            qualified,
            returned = candidates.len(),
            top_score = candidates.first().map(|c| c.score),
            "ranked reference catalog"
        );

        if let Some(recorder) = metrics_recorder() {
            recorder.record_match(references.len(), start.elapsed(), candidates.len());
        }

        candidates
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::from_validated(MatchConfig::default())
    }
}

/// Rank `references` against `input` with the default scoring configuration.
pub fn recommend(references: &[ReferenceRecord], input: &CurrentInput) -> Vec<ScoredCandidate> {
    Matcher::default().recommend(references, input)
}
