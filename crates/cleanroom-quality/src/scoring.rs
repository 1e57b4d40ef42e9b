use std::collections::BTreeMap;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use cleanroom_profile::Profile;

use crate::issue::Issue;
use crate::rules::{CONSTANT_COLUMN, HIGH_CARDINALITY, HIGH_DUPLICATE_RATE, HIGH_MISSING};

/// Score of a dataset without any penalty.
pub const MAX_SCORE: u32 = 100;

/// Per-rule penalty weights and caps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringConfig {
    /// Penalty per issue, by rule identifier. Missing rules weigh 0.
    pub weights: BTreeMap<String, u32>,
    /// Upper bound of the summed penalty, by rule identifier.
    pub caps: BTreeMap<String, u32>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let table = |values: [(&str, u32); 4]| {
            values
                .into_iter()
                .map(|(rule, value)| (rule.to_string(), value))
                .collect()
        };
        Self {
            weights: table([
                (HIGH_MISSING, 20),
                (CONSTANT_COLUMN, 10),
                (HIGH_CARDINALITY, 25),
                (HIGH_DUPLICATE_RATE, 30),
            ]),
            caps: table([
                (HIGH_MISSING, 40),
                (CONSTANT_COLUMN, 30),
                (HIGH_CARDINALITY, 40),
                (HIGH_DUPLICATE_RATE, 50),
            ]),
        }
    }
}

/// Explainable score for one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreReport {
    pub score: u32,
    pub max_score: u32,
    pub total_penalty: u32,
    /// One entry per rule, in first-occurrence order among the issues.
    pub penalties: Vec<PenaltyBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PenaltyBreakdown {
    pub rule: String,
    pub raw_penalty: u32,
    pub applied_penalty: u32,
    pub cap: u32,
}

/// Capped weighted-deduction scorer.
#[derive(Debug, Clone, Default)]
pub struct QualityScorer {
    config: ScoringConfig,
}

impl QualityScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Deduct the capped per-rule penalties of `issues` from [`MAX_SCORE`].
    ///
    /// The profile is accepted for signature stability; the score depends on
    /// the issues alone.
    pub fn score(&self, _profile: &Profile, issues: &[Issue]) -> ScoreReport {
        let mut raw_by_rule: IndexMap<&str, u32> = IndexMap::new();
        for issue in issues {
            let weight = self.config.weights.get(&issue.rule).copied().unwrap_or(0);
            let raw = raw_by_rule.entry(issue.rule.as_str()).or_insert(0);
            *raw = raw.saturating_add(weight);
        }

        let penalties = raw_by_rule
            .into_iter()
            .map(|(rule, raw_penalty)| {
                let cap = self.config.caps.get(rule).copied().unwrap_or(raw_penalty);
                PenaltyBreakdown {
                    rule: rule.to_string(),
                    raw_penalty,
                    applied_penalty: raw_penalty.min(cap),
                    cap,
                }
            })
            .collect::<Vec<_>>();

        let total_penalty = penalties
            .iter()
            .fold(0u32, |total, penalty| total.saturating_add(penalty.applied_penalty));
        let score = MAX_SCORE.saturating_sub(total_penalty);

        debug!(score, total_penalty, rules = penalties.len(), "score computed");

        ScoreReport {
            score,
            max_score: MAX_SCORE,
            total_penalty,
            penalties,
        }
    }
}
