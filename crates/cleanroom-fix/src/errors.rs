use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors emitted by the fix applier.
///
/// Any error aborts the whole batch; no partially fixed table is returned.
#[derive(Debug, Error)]
pub enum FixError {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    /// `column` is `None` when a column-scoped operation names no column.
    #[error(
        "operation '{}' requires column '{}', which is not in the table",
        .operation,
        .column.as_deref().unwrap_or("<none>")
    )]
    MissingColumn {
        operation: String,
        column: Option<String>,
    },
    #[error("operation '{operation}' does not support column '{column}' of type {dtype}")]
    UnsupportedColumn {
        operation: String,
        column: String,
        dtype: String,
    },
    #[error(transparent)]
    Core(#[from] cleanroom_core::Error),
    #[error("dataframe error: {0}")]
    Frame(#[from] PolarsError),
}

/// Result type for fix operations.
pub type Result<T> = std::result::Result<T, FixError>;
