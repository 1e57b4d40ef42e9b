use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use cleanroom_fix::{FixKind, FixOperation, Params};
use cleanroom_profile::Profile;

use crate::issue::Issue;
use crate::rules::{CONSTANT_COLUMN, HIGH_CARDINALITY, HIGH_DUPLICATE_RATE, HIGH_MISSING};

/// A proposed fix with its confidence and rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Suggestion {
    pub column: Option<String>,
    pub operation: String,
    pub params: Params,
    /// In `(0, 1]`.
    pub confidence: f64,
    pub reason: String,
}

impl Suggestion {
    fn new(column: Option<&str>, kind: FixKind, confidence: f64, reason: &str) -> Self {
        Self {
            column: column.map(str::to_string),
            operation: kind.as_str().to_string(),
            params: Params::new(),
            confidence,
            reason: reason.to_string(),
        }
    }
}

impl From<&Suggestion> for FixOperation {
    fn from(suggestion: &Suggestion) -> Self {
        FixOperation {
            operation: suggestion.operation.clone(),
            column: suggestion.column.clone(),
            params: suggestion.params.clone(),
        }
    }
}

/// Maps issues to deterministic fix suggestions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionEngine;

impl SuggestionEngine {
    pub fn new() -> Self {
        Self
    }

    /// One suggestion per `(column, operation)`, in issue order.
    pub fn generate(&self, profile: &Profile, issues: &[Issue]) -> Vec<Suggestion> {
        let mut seen = HashSet::new();
        let mut suggestions = Vec::new();

        for issue in issues {
            let Some(suggestion) = suggest(profile, issue) else {
                continue;
            };
            if seen.insert((suggestion.column.clone(), suggestion.operation.clone())) {
                suggestions.push(suggestion);
            }
        }

        debug!(
            issues = issues.len(),
            suggestions = suggestions.len(),
            "suggestions generated"
        );
        suggestions
    }
}

fn suggest(profile: &Profile, issue: &Issue) -> Option<Suggestion> {
    let column = issue.column.as_deref();
    match (issue.rule.as_str(), column) {
        (HIGH_MISSING, Some(name)) => {
            let meta = profile.column(name)?;
            let suggestion = if meta.missing_pct == 1.0 {
                Suggestion::new(column, FixKind::DropColumn, 1.0, "completely missing")
            } else if meta.dtype.contains("int") || meta.dtype.contains("float") {
                Suggestion::new(
                    column,
                    FixKind::ImputeMedian,
                    1.0,
                    "numeric column with high missing ratio",
                )
            } else {
                Suggestion::new(
                    column,
                    FixKind::ImputeMode,
                    1.0,
                    "categorical column with high missing ratio",
                )
            };
            Some(suggestion)
        }
        (CONSTANT_COLUMN, Some(_)) => Some(Suggestion::new(
            column,
            FixKind::DropColumn,
            0.9,
            "single unique value",
        )),
        (HIGH_CARDINALITY, Some(_)) => Some(Suggestion::new(
            column,
            FixKind::DropColumn,
            0.7,
            "high cardinality, likely unsuitable for modeling",
        )),
        (HIGH_DUPLICATE_RATE, _) => Some(Suggestion::new(
            None,
            FixKind::DropDuplicates,
            0.8,
            "dataset has high duplicate rate",
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Severity;
    use cleanroom_profile::{ColumnProfile, DatasetSummary, PROFILE_VERSION};

    fn column(dtype: &str, missing_pct: f64) -> ColumnProfile {
        ColumnProfile {
            dtype: dtype.to_string(),
            missing: 0,
            missing_pct,
            unique: 1,
            is_constant: true,
            numeric: None,
        }
    }

    fn profile(columns: Vec<(&str, ColumnProfile)>) -> Profile {
        Profile {
            profile_version: PROFILE_VERSION.to_string(),
            dataset: DatasetSummary {
                rows: 10,
                cols: columns.len() as u64,
                memory_bytes: 0,
                sampled: false,
                sample_size: 10,
            },
            columns: columns
                .into_iter()
                .map(|(name, column)| (name.to_string(), column))
                .collect(),
            duplicates: 0,
        }
    }

    fn issue(rule: &str, column: Option<&str>) -> Issue {
        Issue {
            column: column.map(str::to_string),
            rule: rule.to_string(),
            severity: Severity::Medium,
            metric: 1.0,
            threshold: None,
        }
    }

    #[test]
    fn high_missing_picks_operation_by_dtype() {
        let profile = profile(vec![
            ("gone", column("float64", 1.0)),
            ("age", column("int64", 0.5)),
            ("city", column("string", 0.5)),
        ]);
        let issues = vec![
            issue(HIGH_MISSING, Some("gone")),
            issue(HIGH_MISSING, Some("age")),
            issue(HIGH_MISSING, Some("city")),
        ];

        let suggestions = SuggestionEngine::new().generate(&profile, &issues);
        let ops = suggestions
            .iter()
            .map(|suggestion| (suggestion.operation.as_str(), suggestion.reason.as_str()))
            .collect::<Vec<_>>();

        assert_eq!(
            ops,
            vec![
                ("drop_column", "completely missing"),
                ("impute_median", "numeric column with high missing ratio"),
                ("impute_mode", "categorical column with high missing ratio"),
            ]
        );
        assert!(suggestions.iter().all(|suggestion| suggestion.confidence == 1.0));
    }

    #[test]
    fn duplicates_are_collapsed_first_wins() {
        let profile = profile(vec![("a", column("null", 1.0))]);
        let issues = vec![
            issue(HIGH_MISSING, Some("a")),
            issue(CONSTANT_COLUMN, Some("a")),
        ];

        let suggestions = SuggestionEngine::new().generate(&profile, &issues);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].confidence, 1.0);
        assert_eq!(suggestions[0].reason, "completely missing");
    }

    #[test]
    fn column_less_and_unknown_issues_are_ignored() {
        let profile = profile(vec![("a", column("int64", 0.5))]);
        let issues = vec![
            issue(CONSTANT_COLUMN, None),
            issue(HIGH_MISSING, None),
            issue(HIGH_MISSING, Some("not_profiled")),
            issue("custom_rule", Some("a")),
        ];
        assert!(SuggestionEngine::new().generate(&profile, &issues).is_empty());
    }

    #[test]
    fn duplicate_rate_suggests_dataset_fix() {
        let suggestions = SuggestionEngine::new()
            .generate(&profile(Vec::new()), &[issue(HIGH_DUPLICATE_RATE, None)]);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].column, None);
        assert_eq!(suggestions[0].operation, "drop_duplicates");
        assert_eq!(suggestions[0].confidence, 0.8);
    }

    #[test]
    fn converts_to_fix_operation() {
        let suggestion = Suggestion::new(Some("a"), FixKind::DropColumn, 0.9, "single unique value");
        let fix = FixOperation::from(&suggestion);
        assert_eq!(fix, FixOperation::new(FixKind::DropColumn, Some("a")));
    }
}
