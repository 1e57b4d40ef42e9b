//! Public API surface for the cleanroom library.
//!
//! [`DataCleaner`] owns a table, caches its profile and exposes the quality
//! pipeline: profile, rule checks, scoring, suggestions, fix application and
//! reporting. The member crates are re-exported for callers that want to
//! assemble the pipeline themselves.

pub mod config;
pub mod error;

use std::path::Path;

use tracing::{debug, info};

pub use cleanroom_core::{DType, Table};
pub use cleanroom_fix::{FixApplier, FixError, FixKind, FixOperation};
pub use cleanroom_profile::{
    ColumnProfile, DEFAULT_MAX_SAMPLE_SIZE, DatasetSummary, NumericSummary, Profile, Profiler,
};
pub use cleanroom_quality::{
    Issue, QualityRule, QualityScorer, RuleEngine, RuleThresholds, ScoreReport, ScoringConfig,
    Severity, Suggestion, SuggestionEngine,
};
pub use cleanroom_report::{JsonExporter, Report, ReportBuilder, ReportFormat, render_markdown};
pub use config::QualityConfig;
pub use error::{CleanerError, Result};

/// Entry point of the quality pipeline for one table.
///
/// The profile is computed lazily and cached; every quality method reuses the
/// cached profile until [`DataCleaner::profile`] recomputes it or
/// [`DataCleaner::invalidate`] clears it.
#[derive(Debug, Clone)]
pub struct DataCleaner {
    table: Table,
    config: QualityConfig,
    profile_cache: Option<Profile>,
}

impl DataCleaner {
    /// Wrap `table` with the default configuration.
    pub fn new(table: Table) -> Self {
        Self {
            table,
            config: QualityConfig::default(),
            profile_cache: None,
        }
    }

    /// Wrap `table` with `config`, rejecting invalid settings.
    pub fn with_config(table: Table, config: QualityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            table,
            config,
            profile_cache: None,
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    pub fn cached_profile(&self) -> Option<&Profile> {
        self.profile_cache.as_ref()
    }

    /// Drop the cached profile so the next call recomputes it.
    pub fn invalidate(&mut self) {
        self.profile_cache = None;
    }

    /// Profile the table with `max_sample_size` and replace the cache.
    pub fn profile(&mut self, max_sample_size: usize) -> Result<&Profile> {
        let profile = Profiler::new(max_sample_size)?.run(&self.table)?;
        Ok(self.profile_cache.insert(profile))
    }

    /// Profile with the configured sample size and replace the cache.
    pub fn profile_default(&mut self) -> Result<&Profile> {
        self.profile(self.config.max_sample_size)
    }

    /// Issues raised by the configured rules.
    pub fn check_quality(&mut self) -> Result<Vec<Issue>> {
        let engine = RuleEngine::from_thresholds(&self.config.rules);
        let profile = self.ensure_profile()?;
        Ok(engine.run(profile))
    }

    pub fn quality_score(&mut self) -> Result<ScoreReport> {
        let issues = self.check_quality()?;
        let scorer = QualityScorer::new(self.config.scoring.clone());
        let profile = self.ensure_profile()?;
        Ok(scorer.score(profile, &issues))
    }

    /// Suggestions whose confidence is at least `min_confidence`.
    pub fn suggest_fixes(&mut self, min_confidence: f64) -> Result<Vec<Suggestion>> {
        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(cleanroom_core::Error::InvalidInput(format!(
                "confidence threshold must be within [0, 1], got {min_confidence}"
            ))
            .into());
        }
        let issues = self.check_quality()?;
        let profile = self.ensure_profile()?;
        let suggestions = SuggestionEngine::new()
            .generate(profile, &issues)
            .into_iter()
            .filter(|suggestion| suggestion.confidence >= min_confidence)
            .collect();
        Ok(suggestions)
    }

    /// Apply `fixes` to a copy of the table.
    ///
    /// Returns a new facade over the fixed table with the same configuration
    /// and an empty profile cache; `self` is left untouched.
    pub fn apply_fixes(&self, fixes: &[FixOperation]) -> Result<DataCleaner> {
        let table = FixApplier::new().apply(&self.table, fixes)?;
        Ok(Self {
            table,
            config: self.config.clone(),
            profile_cache: None,
        })
    }

    /// Profile, issues, score and all suggestions in one report.
    pub fn build_report(&mut self) -> Result<Report> {
        let issues = self.check_quality()?;
        let score = QualityScorer::new(self.config.scoring.clone())
            .score(self.ensure_profile()?, &issues);
        let profile = self.ensure_profile()?.clone();
        let suggestions = SuggestionEngine::new().generate(&profile, &issues);
        Ok(ReportBuilder::new().build(profile, issues, score, suggestions))
    }

    /// Render the report in `format`, writing it to `path` when given.
    pub fn export_report(&mut self, format: ReportFormat, path: Option<&Path>) -> Result<String> {
        let report = self.build_report()?;
        let rendered = match format {
            ReportFormat::Json => JsonExporter::new().export(&report, path)?,
            ReportFormat::Markdown => {
                let markdown = render_markdown(&report);
                if let Some(path) = path {
                    cleanroom_report::write_text(path, &markdown)?;
                }
                markdown
            }
        };
        info!(format = %format, written = path.is_some(), "report exported");
        Ok(rendered)
    }

    fn ensure_profile(&mut self) -> Result<&Profile> {
        let profile = match self.profile_cache.take() {
            Some(profile) => {
                debug!("profile cache hit");
                profile
            }
            None => {
                debug!("profile cache miss");
                Profiler::new(self.config.max_sample_size)?.run(&self.table)?
            }
        };
        Ok(self.profile_cache.insert(profile))
    }
}
