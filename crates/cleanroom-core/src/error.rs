use polars::prelude::PolarsError;
use thiserror::Error;

/// Core error type shared across cleanroom crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The input is not a well-formed table or the configuration is invalid.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A column-scoped operation referenced a column the table does not have.
    #[error("column '{0}' not found in table")]
    MissingColumn(String),
    #[error("dataframe error: {0}")]
    Frame(#[from] PolarsError),
}

/// Convenience alias for results returned by cleanroom crates.
pub type Result<T> = std::result::Result<T, Error>;
