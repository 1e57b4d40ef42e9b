use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use cleanroom_profile::Profile;
use cleanroom_quality::{Issue, ScoreReport, Suggestion};

/// Aggregated quality report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Report {
    pub profile: Profile,
    pub quality_issues: Vec<Issue>,
    pub quality_score: ScoreReport,
    pub suggested_fixes: Vec<Suggestion>,
}

/// Assembles a [`Report`] from already computed parts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportBuilder;

impl ReportBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Bundle the parts as-is; nothing is recomputed.
    pub fn build(
        &self,
        profile: Profile,
        issues: Vec<Issue>,
        score: ScoreReport,
        suggestions: Vec<Suggestion>,
    ) -> Report {
        debug!(
            issues = issues.len(),
            score = score.score,
            suggestions = suggestions.len(),
            "report built"
        );
        Report {
            profile,
            quality_issues: issues,
            quality_score: score,
            suggested_fixes: suggestions,
        }
    }
}
