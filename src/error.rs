use thiserror::Error;

use cleanroom_fix::FixError;
use cleanroom_report::ReportError;

/// Errors surfaced by the [`crate::DataCleaner`] facade.
#[derive(Debug, Error)]
pub enum CleanerError {
    /// Malformed table or invalid configuration.
    #[error(transparent)]
    Core(#[from] cleanroom_core::Error),
    #[error(transparent)]
    Fix(#[from] FixError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Convenience alias for facade results.
pub type Result<T> = std::result::Result<T, CleanerError>;
