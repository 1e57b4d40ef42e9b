use serde::{Deserialize, Serialize};

use cleanroom_core::{Error, Result};
use cleanroom_profile::DEFAULT_MAX_SAMPLE_SIZE;
use cleanroom_quality::{RuleThresholds, ScoringConfig};

/// Tunables for a quality run. Every field falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Rows used for the duplicate count before sampling kicks in.
    pub max_sample_size: usize,
    pub rules: RuleThresholds,
    pub scoring: ScoringConfig,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            max_sample_size: DEFAULT_MAX_SAMPLE_SIZE,
            rules: RuleThresholds::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl QualityConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_sample_size == 0 {
            return Err(Error::InvalidInput(
                "max_sample_size must be a positive integer".to_string(),
            ));
        }
        for (rule, threshold) in self.rules.entries() {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(Error::InvalidInput(format!(
                    "threshold for {rule} must be within [0, 1], got {threshold}"
                )));
            }
        }
        Ok(())
    }
}
