use std::fmt::Debug;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use cleanroom_profile::Profile;

use crate::issue::{Issue, Severity};

pub const HIGH_MISSING: &str = "high_missing";
pub const CONSTANT_COLUMN: &str = "constant_column";
pub const HIGH_CARDINALITY: &str = "high_cardinality";
pub const HIGH_DUPLICATE_RATE: &str = "high_duplicate_rate";

/// A check evaluated against a profile.
///
/// Rules are pure: the same profile always yields the same issues, in
/// profile column order.
pub trait QualityRule: Debug + Send + Sync {
    /// Stable rule identifier, used as `Issue::rule`.
    fn name(&self) -> &str;

    fn evaluate(&self, profile: &Profile) -> Vec<Issue>;
}

/// Flags columns whose missing ratio exceeds the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighMissingRule {
    pub threshold: f64,
}

impl Default for HighMissingRule {
    fn default() -> Self {
        Self { threshold: 0.3 }
    }
}

impl QualityRule for HighMissingRule {
    fn name(&self) -> &str {
        HIGH_MISSING
    }

    fn evaluate(&self, profile: &Profile) -> Vec<Issue> {
        profile
            .columns
            .iter()
            .filter(|(_, column)| column.missing_pct > self.threshold)
            .map(|(name, column)| {
                Issue::column(
                    name,
                    HIGH_MISSING,
                    Severity::Medium,
                    column.missing_pct,
                    Some(self.threshold),
                )
            })
            .collect()
    }
}

/// Flags columns with at most one distinct non-null value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConstantColumnRule;

impl QualityRule for ConstantColumnRule {
    fn name(&self) -> &str {
        CONSTANT_COLUMN
    }

    fn evaluate(&self, profile: &Profile) -> Vec<Issue> {
        profile
            .columns
            .iter()
            .filter(|(_, column)| column.is_constant)
            .map(|(name, _)| Issue::column(name, CONSTANT_COLUMN, Severity::Low, 1.0, None))
            .collect()
    }
}

/// Flags columns whose distinct-value ratio exceeds the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighCardinalityRule {
    pub threshold: f64,
}

impl Default for HighCardinalityRule {
    fn default() -> Self {
        Self { threshold: 0.9 }
    }
}

impl QualityRule for HighCardinalityRule {
    fn name(&self) -> &str {
        HIGH_CARDINALITY
    }

    fn evaluate(&self, profile: &Profile) -> Vec<Issue> {
        let rows = profile.rows();
        if rows == 0 {
            return Vec::new();
        }

        profile
            .columns
            .iter()
            .filter_map(|(name, column)| {
                let ratio = column.unique as f64 / rows as f64;
                (ratio > self.threshold).then(|| {
                    Issue::column(
                        name,
                        HIGH_CARDINALITY,
                        Severity::Medium,
                        ratio,
                        Some(self.threshold),
                    )
                })
            })
            .collect()
    }
}

/// Flags the dataset when its duplicate-row rate exceeds the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuplicateRateRule {
    pub threshold: f64,
}

impl Default for DuplicateRateRule {
    fn default() -> Self {
        Self { threshold: 0.1 }
    }
}

impl QualityRule for DuplicateRateRule {
    fn name(&self) -> &str {
        HIGH_DUPLICATE_RATE
    }

    fn evaluate(&self, profile: &Profile) -> Vec<Issue> {
        let rows = profile.rows();
        if rows == 0 {
            return Vec::new();
        }

        let rate = profile.duplicates as f64 / rows as f64;
        if rate > self.threshold {
            vec![Issue::dataset(
                HIGH_DUPLICATE_RATE,
                Severity::High,
                rate,
                Some(self.threshold),
            )]
        } else {
            Vec::new()
        }
    }
}

/// Thresholds for the built-in rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RuleThresholds {
    pub high_missing: f64,
    pub high_cardinality: f64,
    pub high_duplicate_rate: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            high_missing: HighMissingRule::default().threshold,
            high_cardinality: HighCardinalityRule::default().threshold,
            high_duplicate_rate: DuplicateRateRule::default().threshold,
        }
    }
}

impl RuleThresholds {
    /// Threshold values by rule identifier, for validation and display.
    pub fn entries(&self) -> [(&'static str, f64); 3] {
        [
            (HIGH_MISSING, self.high_missing),
            (HIGH_CARDINALITY, self.high_cardinality),
            (HIGH_DUPLICATE_RATE, self.high_duplicate_rate),
        ]
    }
}

/// Ordered rule list evaluated against a profile.
#[derive(Debug)]
pub struct RuleEngine {
    rules: Vec<Box<dyn QualityRule>>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::from_thresholds(&RuleThresholds::default())
    }
}

impl RuleEngine {
    /// Engine running exactly `rules`, in order.
    pub fn new(rules: Vec<Box<dyn QualityRule>>) -> Self {
        Self { rules }
    }

    /// The built-in rule set configured with `thresholds`.
    pub fn from_thresholds(thresholds: &RuleThresholds) -> Self {
        Self::new(vec![
            Box::new(HighMissingRule {
                threshold: thresholds.high_missing,
            }),
            Box::new(HighCardinalityRule {
                threshold: thresholds.high_cardinality,
            }),
            Box::new(ConstantColumnRule),
            Box::new(DuplicateRateRule {
                threshold: thresholds.high_duplicate_rate,
            }),
        ])
    }

    /// Append a rule after the existing ones.
    pub fn with_rule(mut self, rule: impl QualityRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Run every rule and concatenate the issues in rule order.
    pub fn run(&self, profile: &Profile) -> Vec<Issue> {
        let mut issues = Vec::new();
        for rule in &self.rules {
            let found = rule.evaluate(profile);
            debug!(rule = rule.name(), issues = found.len(), "rule evaluated");
            issues.extend(found);
        }
        issues
    }
}
