use polars::prelude::DataFrame;

use crate::dtype::DType;
use crate::error::{Error, Result};

/// Validate that a frame can be used as a cleanroom table.
///
/// This checks:
/// - column names are non-empty
/// - every column has a supported type (numeric, bool, string, temporal or
///   missing-only)
///
/// Unique names and equal column lengths are enforced by `DataFrame` itself.
pub fn validate_frame(frame: &DataFrame) -> Result<()> {
    for column in frame.get_columns() {
        if column.name().is_empty() {
            return Err(Error::InvalidInput("column name must not be empty".to_string()));
        }
        if DType::of(column.dtype()).is_none() {
            return Err(Error::InvalidInput(format!(
                "column '{}' has unsupported type {}",
                column.name(),
                column.dtype()
            )));
        }
    }
    Ok(())
}
