use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use cleanroom_core::Table;

use super::DatasetResult;

/// Load a headed CSV file, inferring one type per column.
///
/// Empty cells are nulls. Integers, floats, booleans and ISO dates are
/// inferred from the whole file, anything else is text. Float columns holding
/// `inf` or `nan` tokens are kept as text, and a column of only empty cells is
/// missing-only.
pub fn read_table_csv(path: &Path) -> DatasetResult<Table> {
    let inferred = scan(path, None)?;

    let non_finite = inferred
        .get_columns()
        .iter()
        .filter(|column| has_non_finite(column))
        .map(|column| column.name().clone())
        .collect::<Vec<_>>();
    let text = if non_finite.is_empty() {
        None
    } else {
        Some(scan(path, Some(0))?)
    };

    let columns = inferred
        .get_columns()
        .iter()
        .map(|column| {
            if let Some(text) = text.as_ref().filter(|_| non_finite.contains(column.name())) {
                return Ok(text.column(column.name())?.clone());
            }
            if column.null_count() == column.len() {
                return Ok(Column::full_null(
                    column.name().clone(),
                    column.len(),
                    &DataType::Null,
                ));
            }
            Ok(column.clone())
        })
        .collect::<PolarsResult<Vec<_>>>()?;

    let table = Table::from_columns(columns)?;
    debug!(
        path = %path.display(),
        rows = table.row_count(),
        cols = table.column_count(),
        text_columns = non_finite.len(),
        "csv loaded"
    );
    Ok(table)
}

/// Write a table as headed CSV in column order; nulls become empty cells.
pub fn write_table_csv(path: &Path, table: &Table) -> DatasetResult<u64> {
    let mut frame = table.frame().clone();
    let file = BufWriter::new(File::create(path)?);
    CsvWriter::new(file).include_header(true).finish(&mut frame)?;

    Ok(table.row_count() as u64)
}

/// `infer_rows` of `Some(0)` reads every column as text.
fn scan(path: &Path, infer_rows: Option<usize>) -> PolarsResult<DataFrame> {
    LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(infer_rows)
        .with_try_parse_dates(infer_rows.is_none())
        .finish()?
        .collect()
}

fn has_non_finite(column: &Column) -> bool {
    column
        .as_materialized_series()
        .f64()
        .map(|values| values.into_iter().flatten().any(|value| !value.is_finite()))
        .unwrap_or(false)
}
