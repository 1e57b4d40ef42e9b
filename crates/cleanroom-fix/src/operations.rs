//! One handler per [`FixKind`]. Every handler returns a new table.

use polars::prelude::*;

use cleanroom_core::{DType, Table};

use crate::errors::{FixError, Result};
use crate::model::{FixKind, Params};

/// Run a single fix against `table`.
pub fn apply(
    kind: FixKind,
    table: &Table,
    column: Option<&str>,
    _params: &Params,
) -> Result<Table> {
    match kind {
        FixKind::DropColumn => {
            let name = require_column(kind, table, column)?;
            Ok(table.without_column(name)?)
        }
        FixKind::ImputeMean | FixKind::ImputeMedian => {
            impute_statistic(kind, table, require_column(kind, table, column)?)
        }
        FixKind::ImputeMode => impute_mode(table, require_column(kind, table, column)?),
        FixKind::StripStrings => strip_strings(table, require_column(kind, table, column)?),
        FixKind::DropDuplicates => Ok(table.drop_duplicates()?),
    }
}

fn require_column<'a>(kind: FixKind, table: &Table, column: Option<&'a str>) -> Result<&'a str> {
    match column {
        Some(name) if table.has_column(name) => Ok(name),
        _ => Err(FixError::MissingColumn {
            operation: kind.as_str().to_string(),
            column: column.map(str::to_string),
        }),
    }
}

fn impute_statistic(kind: FixKind, table: &Table, name: &str) -> Result<Table> {
    let dtype = table.dtype(name).unwrap_or(DType::Null);
    if !dtype.is_numeric() && dtype != DType::Null {
        return Err(FixError::UnsupportedColumn {
            operation: kind.as_str().to_string(),
            column: name.to_string(),
            dtype: dtype.label().to_string(),
        });
    }

    let Some(column) = table.column(name) else {
        return Ok(table.clone());
    };
    let floats = column.as_materialized_series().cast(&DataType::Float64)?;
    let values = floats.f64()?;
    let fill = match kind {
        FixKind::ImputeMedian => values.median(),
        _ => values.mean(),
    };
    let Some(fill) = fill else {
        return Ok(table.clone());
    };

    // Integer columns stay integer only when the fill value is integral.
    let filled = if dtype == DType::Int && fill.fract() == 0.0 {
        col(name).fill_null(lit(fill as i64))
    } else {
        col(name).cast(DataType::Float64).fill_null(lit(fill))
    };
    Ok(table.with_column_expr(filled)?)
}

fn impute_mode(table: &Table, name: &str) -> Result<Table> {
    let Some(mode) = mode(table, name)? else {
        return Ok(table.clone());
    };
    Ok(table.with_column_expr(col(name).fill_null(lit(mode).first()))?)
}

/// Most frequent non-null value of a column, as a one-row series; ties go to
/// the value seen first.
fn mode(table: &Table, name: &str) -> Result<Option<Series>> {
    let counts = table
        .frame()
        .clone()
        .lazy()
        .select([col(name).alias("value")])
        .filter(col("value").is_not_null())
        .group_by_stable([col("value")])
        .agg([len().alias("count")])
        .collect()?;

    let Some(first_max) = counts.column("count")?.as_materialized_series().arg_max() else {
        return Ok(None);
    };
    let values = counts.column("value")?.as_materialized_series();
    Ok(Some(values.slice(first_max as i64, 1)))
}

fn strip_strings(table: &Table, name: &str) -> Result<Table> {
    let stripped = col(name)
        .cast(DataType::String)
        .str()
        .strip_chars(lit(NULL));
    Ok(table.with_column_expr(stripped)?)
}
