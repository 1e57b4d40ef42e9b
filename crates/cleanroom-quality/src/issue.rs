use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Severity level for quality issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Issue {
    /// Affected column; `None` for dataset-level issues.
    pub column: Option<String>,
    /// Identifier of the rule that raised the issue.
    pub rule: String,
    pub severity: Severity,
    /// Observed value that tripped the rule.
    pub metric: f64,
    /// Configured threshold, when the rule has one.
    pub threshold: Option<f64>,
}

impl Issue {
    /// Create an issue for `column`.
    pub fn column(
        column: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        metric: f64,
        threshold: Option<f64>,
    ) -> Self {
        Self {
            column: Some(column.into()),
            rule: rule.into(),
            severity,
            metric,
            threshold,
        }
    }

    /// Create an issue that concerns the whole dataset.
    pub fn dataset(
        rule: impl Into<String>,
        severity: Severity,
        metric: f64,
        threshold: Option<f64>,
    ) -> Self {
        Self {
            column: None,
            rule: rule.into(),
            severity,
            metric,
            threshold,
        }
    }
}
