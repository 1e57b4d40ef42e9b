//! Quality assessment for cleanroom.
//!
//! Evaluates rules against a [`cleanroom_profile::Profile`], turns the
//! resulting issues into a capped 0-100 score and maps them to
//! deterministic fix suggestions.

pub mod issue;
pub mod rules;
pub mod scoring;
pub mod suggestions;

pub use issue::{Issue, Severity};
pub use rules::{
    CONSTANT_COLUMN, ConstantColumnRule, DuplicateRateRule, HIGH_CARDINALITY, HIGH_DUPLICATE_RATE,
    HIGH_MISSING, HighCardinalityRule, HighMissingRule, QualityRule, RuleEngine, RuleThresholds,
};
pub use scoring::{MAX_SCORE, PenaltyBreakdown, QualityScorer, ScoreReport, ScoringConfig};
pub use suggestions::{Suggestion, SuggestionEngine};
