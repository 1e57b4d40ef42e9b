use cleanroom_quality::{CONSTANT_COLUMN, HIGH_CARDINALITY, HIGH_DUPLICATE_RATE, HIGH_MISSING};

use crate::model::Report;

/// Render a deterministic markdown summary of a report.
pub fn render_markdown(report: &Report) -> String {
    let profile = &report.profile;
    let score = &report.quality_score;
    let mut lines = Vec::new();

    lines.push("# Cleanroom Quality Report".to_string());
    lines.push(String::new());
    lines.push("## Run summary".to_string());
    lines.push(format!("- profile_version: {}", profile.profile_version));
    lines.push(format!("- rows: {}", profile.dataset.rows));
    lines.push(format!("- cols: {}", profile.dataset.cols));
    lines.push(format!("- memory_bytes: {}", profile.dataset.memory_bytes));
    lines.push(format!(
        "- duplicates: {} (sampled: {}, sample_size: {})",
        profile.duplicates, profile.dataset.sampled, profile.dataset.sample_size
    ));
    lines.push(format!("- score: {}/{}", score.score, score.max_score));
    lines.push(String::new());

    lines.push("## Columns".to_string());
    lines.push("| column | dtype | missing | missing_pct | unique | constant |".to_string());
    lines.push("| --- | --- | --- | --- | --- | --- |".to_string());
    for (name, column) in &profile.columns {
        lines.push(format!(
            "| {} | {} | {} | {:.4} | {} | {} |",
            name, column.dtype, column.missing, column.missing_pct, column.unique, column.is_constant
        ));
    }
    lines.push(String::new());

    if !report.quality_issues.is_empty() {
        lines.push("## Issues".to_string());
        for issue in &report.quality_issues {
            let target = issue.column.as_deref().unwrap_or("<dataset>");
            let threshold = issue
                .threshold
                .map(|threshold| format!(" > {threshold}"))
                .unwrap_or_default();
            lines.push(format!(
                "- [{}] {} on {}: metric={:.4}{}",
                issue.severity, issue.rule, target, issue.metric, threshold
            ));
        }
        lines.push(String::new());
    }

    if !score.penalties.is_empty() {
        lines.push("## Penalty breakdown".to_string());
        lines.push("| rule | raw | applied | cap |".to_string());
        lines.push("| --- | --- | --- | --- |".to_string());
        for penalty in &score.penalties {
            lines.push(format!(
                "| {} | {} | {} | {} |",
                penalty.rule, penalty.raw_penalty, penalty.applied_penalty, penalty.cap
            ));
        }
        lines.push(format!("- total_penalty: {}", score.total_penalty));
        lines.push(String::new());
    }

    if !report.suggested_fixes.is_empty() {
        lines.push("## Suggested fixes".to_string());
        for suggestion in &report.suggested_fixes {
            let target = suggestion.column.as_deref().unwrap_or("<dataset>");
            lines.push(format!(
                "- {} on {} (confidence {:.2}): {}",
                suggestion.operation, target, suggestion.confidence, suggestion.reason
            ));
        }
        lines.push(String::new());
    }

    lines.push("## Recommendations".to_string());
    lines.extend(recommendations(report));
    lines.join("\n")
}

fn recommendations(report: &Report) -> Vec<String> {
    let fired = |rule: &str| report.quality_issues.iter().any(|issue| issue.rule == rule);
    let mut lines = Vec::new();
    if fired(HIGH_MISSING) {
        lines.push("- impute or drop columns with a high missing ratio.".to_string());
    }
    if fired(CONSTANT_COLUMN) {
        lines.push("- drop constant columns; they carry no signal.".to_string());
    }
    if fired(HIGH_CARDINALITY) {
        lines.push("- review identifier-like columns before modeling.".to_string());
    }
    if fired(HIGH_DUPLICATE_RATE) {
        lines.push("- deduplicate rows and check the upstream extract.".to_string());
    }
    if report.quality_issues.is_empty() {
        lines.push("- no issues detected; compare profiles across runs for drift.".to_string());
    }
    lines
}
