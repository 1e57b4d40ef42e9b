use thiserror::Error;

/// Errors emitted while exporting reports.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("unsupported report format: {0} (expected json or markdown)")]
    UnsupportedFormat(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
