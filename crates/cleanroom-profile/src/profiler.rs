use indexmap::IndexMap;
use polars::prelude::*;
use tracing::debug;

use cleanroom_core::{DType, Error, Result, Table};

use crate::model::{ColumnProfile, DatasetSummary, NumericSummary, PROFILE_VERSION, Profile};
use crate::sampling::{SAMPLE_SEED, sample_indices};

/// Default bound on the rows used for the duplicate count.
pub const DEFAULT_MAX_SAMPLE_SIZE: usize = 50_000;

/// Deterministic dataset profiler.
///
/// Only the duplicate-row count is computed on a sample when the table
/// exceeds `max_sample_size`; missing ratios, uniqueness and numeric
/// summaries always scan the full table.
#[derive(Debug, Clone)]
pub struct Profiler {
    max_sample_size: usize,
}

impl Default for Profiler {
    fn default() -> Self {
        Self {
            max_sample_size: DEFAULT_MAX_SAMPLE_SIZE,
        }
    }
}

impl Profiler {
    pub fn new(max_sample_size: usize) -> Result<Self> {
        if max_sample_size == 0 {
            return Err(Error::InvalidInput(
                "max sample size must be a positive integer".to_string(),
            ));
        }
        Ok(Self { max_sample_size })
    }

    pub fn max_sample_size(&self) -> usize {
        self.max_sample_size
    }

    pub fn run(&self, table: &Table) -> Result<Profile> {
        let total_rows = table.row_count();
        let sample = sample_indices(total_rows, self.max_sample_size, SAMPLE_SEED);

        let (sampled, sample_size, duplicates) = match &sample {
            Some(indices) => (
                true,
                indices.len(),
                table.take_rows(indices)?.duplicate_count()?,
            ),
            None => (false, total_rows, table.duplicate_count()?),
        };

        let columns = table
            .columns()
            .iter()
            .map(|column| {
                let profile = profile_column(column, total_rows)?;
                Ok((column.name().to_string(), profile))
            })
            .collect::<Result<IndexMap<_, _>>>()?;

        debug!(
            rows = total_rows,
            cols = table.column_count(),
            sampled,
            sample_size,
            duplicates,
            "profile computed"
        );

        Ok(Profile {
            profile_version: PROFILE_VERSION.to_string(),
            dataset: DatasetSummary {
                rows: total_rows as u64,
                cols: table.column_count() as u64,
                memory_bytes: table.estimated_bytes(),
                sampled,
                sample_size: sample_size as u64,
            },
            columns,
            duplicates: duplicates as u64,
        })
    }
}

fn profile_column(column: &Column, total_rows: usize) -> Result<ColumnProfile> {
    let dtype = DType::of(column.dtype()).ok_or_else(|| {
        Error::InvalidInput(format!(
            "column '{}' has unsupported type {}",
            column.name(),
            column.dtype()
        ))
    })?;
    let series = column.as_materialized_series();

    let missing = series.null_count();
    let unique = series.drop_nulls().n_unique()?;
    let missing_pct = if total_rows > 0 {
        missing as f64 / total_rows as f64
    } else {
        0.0
    };

    let numeric = if dtype.is_numeric() || missing == series.len() {
        Some(numeric_summary(series)?)
    } else {
        None
    };

    Ok(ColumnProfile {
        dtype: dtype.label().to_string(),
        missing: missing as u64,
        missing_pct,
        unique: unique as u64,
        is_constant: unique <= 1,
        numeric,
    })
}

fn numeric_summary(series: &Series) -> Result<NumericSummary> {
    let floats = series.cast(&DataType::Float64)?;
    let values = floats.f64()?;
    let present = values.len() - values.null_count();

    Ok(NumericSummary {
        mean: values.mean(),
        std: if present >= 2 { values.std(1) } else { None },
        min: values.min(),
        max: values.max(),
        median: values.median(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(frame: PolarsResult<DataFrame>) -> Table {
        Table::new(frame.expect("frame")).expect("table")
    }

    fn run(table: &Table) -> Profile {
        Profiler::default().run(table).expect("profile")
    }

    #[test]
    fn missing_percentage() {
        let profile = run(&table(df!("A" => [Some(1i64), None, None, Some(4)])));
        let column = profile.column("A").expect("column A");
        assert_eq!(column.missing, 2);
        assert_eq!(column.missing_pct, 0.5);
    }

    #[test]
    fn unique_count_excludes_nulls() {
        let profile = run(&table(df!("A" => [Some(1i64), Some(1), Some(2), None])));
        assert_eq!(profile.column("A").expect("column A").unique, 2);
    }

    #[test]
    fn nan_counts_as_missing() {
        let profile = run(&table(df!("A" => [1.0, f64::NAN, 3.0])));
        let column = profile.column("A").expect("column A");
        assert_eq!(column.missing, 1);
        assert_eq!(column.unique, 2);
    }

    #[test]
    fn all_null_column_has_empty_numeric_summary() {
        let empty = Column::full_null("A".into(), 2, &DataType::Null);
        let profile = run(&Table::from_columns(vec![empty]).expect("table"));
        let column = profile.column("A").expect("column A");
        assert_eq!(column.dtype, "null");
        assert_eq!(column.numeric, Some(NumericSummary::default()));
        assert!(column.is_constant);
    }

    #[test]
    fn text_columns_have_no_numeric_summary() {
        let profile = run(&table(df!("name" => ["a", "b"])));
        let column = profile.column("name").expect("column");
        assert_eq!(column.dtype, "string");
        assert_eq!(column.numeric, None);
    }

    #[test]
    fn numeric_summary_uses_non_null_values() {
        let profile = run(&table(df!("A" => [Some(1i64), None, Some(3)])));
        let numeric = profile
            .column("A")
            .and_then(|column| column.numeric.clone())
            .expect("numeric summary");
        assert_eq!(numeric.mean, Some(2.0));
        assert_eq!(numeric.median, Some(2.0));
        assert_eq!(numeric.min, Some(1.0));
        assert_eq!(numeric.max, Some(3.0));
        let std = numeric.std.expect("std");
        assert!((std - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn std_needs_two_values() {
        let profile = run(&table(df!("A" => [Some(5.0), None])));
        let numeric = profile
            .column("A")
            .and_then(|column| column.numeric.clone())
            .expect("numeric summary");
        assert_eq!(numeric.mean, Some(5.0));
        assert_eq!(numeric.std, None);
    }

    #[test]
    fn duplicates_are_counted() {
        let profile = run(&table(df!("A" => [1i64, 1], "B" => [2i64, 2])));
        assert_eq!(profile.duplicates, 1);
    }

    #[test]
    fn no_sampling_below_limit() {
        let profiler = Profiler::new(100).expect("profiler");
        let profile = profiler
            .run(&table(df!("A" => [1i64, 2, 3])))
            .expect("profile");
        assert!(!profile.dataset.sampled);
        assert_eq!(profile.dataset.sample_size, 3);
    }

    #[test]
    fn sampling_bounds_duplicate_computation_only() {
        let values = (0..200).map(|idx| idx % 10).collect::<Vec<i64>>();
        let source = table(df!("A" => values));
        let profiler = Profiler::new(50).expect("profiler");

        let first = profiler.run(&source).expect("profile");
        let second = profiler.run(&source).expect("profile");

        assert!(first.dataset.sampled);
        assert_eq!(first.dataset.sample_size, 50);
        assert_eq!(first.dataset.rows, 200);
        assert_eq!(first.duplicates, second.duplicates);
        assert!(first.duplicates >= 40);
        // per-column metrics still come from the full table
        assert_eq!(first.column("A").expect("column A").unique, 10);
    }

    #[test]
    fn empty_table_profiles_without_error() {
        let profile = run(&table(df!("A" => Vec::<i64>::new())));
        assert_eq!(profile.dataset.rows, 0);
        assert_eq!(profile.column("A").expect("column A").missing_pct, 0.0);
        assert_eq!(profile.duplicates, 0);
    }

    #[test]
    fn zero_sample_size_is_invalid() {
        assert!(matches!(Profiler::new(0), Err(Error::InvalidInput(_))));
    }
}
