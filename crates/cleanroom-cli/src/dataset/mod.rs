mod fixes;
mod table_csv;

pub use fixes::load_fix_list;
pub use table_csv::{read_table_csv, write_table_csv};

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while reading or writing dataset files.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataframe error: {0}")]
    Frame(#[from] PolarsError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] cleanroom_core::Error),
    #[error("schema error: {0}")]
    Schema(String),
    #[error("fix list failed validation: {}", .0.join("; "))]
    InvalidFixes(Vec<String>),
}

/// Result type for dataset operations.
pub type DatasetResult<T> = std::result::Result<T, DatasetError>;
