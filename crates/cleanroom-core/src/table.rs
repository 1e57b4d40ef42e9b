use polars::prelude::*;

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::validation::validate_frame;

/// A validated, column-typed data frame.
///
/// Construction normalizes the frame: integer columns become `Int64`, float
/// columns become `Float64` with `NaN` replaced by null, and dates become
/// datetimes. A table is never mutated in place by the quality pipeline;
/// every transformation returns a new table.
#[derive(Debug, Clone, Default)]
pub struct Table {
    frame: DataFrame,
}

impl Table {
    pub fn new(frame: DataFrame) -> Result<Self> {
        validate_frame(&frame)?;
        Ok(Self {
            frame: normalize(frame)?,
        })
    }

    /// Build a table from columns; unequal lengths or repeated names are
    /// `InvalidInput`.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let frame = DataFrame::new(columns).map_err(|err| Error::InvalidInput(err.to_string()))?;
        Self::new(frame)
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    pub fn columns(&self) -> &[Column] {
        self.frame.get_columns()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.frame.column(name).ok()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn dtype(&self, name: &str) -> Option<DType> {
        self.column(name).and_then(|column| DType::of(column.dtype()))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns().iter().map(|column| column.name().as_str())
    }

    pub fn row_count(&self) -> usize {
        self.frame.height()
    }

    pub fn column_count(&self) -> usize {
        self.frame.width()
    }

    pub fn estimated_bytes(&self) -> u64 {
        self.frame.estimated_size() as u64
    }

    /// Rows that repeat an earlier row across all columns.
    pub fn duplicate_count(&self) -> Result<usize> {
        Ok(self.row_count().saturating_sub(self.unique_rows()?.height()))
    }

    /// New table keeping the first occurrence of every distinct row.
    pub fn drop_duplicates(&self) -> Result<Table> {
        Ok(Self {
            frame: self.unique_rows()?,
        })
    }

    /// New table holding the given rows, in the given order.
    pub fn take_rows(&self, indices: &[usize]) -> Result<Table> {
        let indices = IdxCa::from_vec(
            "rows".into(),
            indices.iter().map(|idx| *idx as IdxSize).collect(),
        );
        Ok(Self {
            frame: self.frame.take(&indices)?,
        })
    }

    /// New table without the named column.
    pub fn without_column(&self, name: &str) -> Result<Table> {
        if !self.has_column(name) {
            return Err(Error::MissingColumn(name.to_string()));
        }
        Ok(Self {
            frame: self.frame.drop(name)?,
        })
    }

    /// New table with `expr` evaluated over the frame; an expression named
    /// after an existing column replaces it in place.
    pub fn with_column_expr(&self, expr: Expr) -> Result<Table> {
        let frame = self.frame.clone().lazy().with_column(expr).collect()?;
        Self::new(frame)
    }

    fn unique_rows(&self) -> Result<DataFrame> {
        if self.frame.width() == 0 {
            return Ok(self.frame.clone());
        }
        Ok(self
            .frame
            .unique_stable(None, UniqueKeepStrategy::First, None)?)
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.frame.dtypes() == other.frame.dtypes() && self.frame.equals_missing(&other.frame)
    }
}

fn normalize(frame: DataFrame) -> Result<DataFrame> {
    let exprs = frame
        .get_columns()
        .iter()
        .filter_map(normalizing_expr)
        .collect::<Vec<_>>();
    if exprs.is_empty() {
        return Ok(frame);
    }
    Ok(frame.lazy().with_columns(exprs).collect()?)
}

fn normalizing_expr(column: &Column) -> Option<Expr> {
    let name = column.name().as_str();
    match column.dtype() {
        DataType::Int64 => None,
        DataType::Float64 => Some(col(name).fill_nan(lit(NULL))),
        DataType::Float32 => Some(col(name).cast(DataType::Float64).fill_nan(lit(NULL))),
        DataType::Date => Some(col(name).cast(DataType::Datetime(TimeUnit::Microseconds, None))),
        dtype if dtype.is_integer() => Some(col(name).strict_cast(DataType::Int64)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(frame: PolarsResult<DataFrame>) -> Table {
        Table::new(frame.expect("frame")).expect("table")
    }

    #[test]
    fn rejects_ragged_columns() {
        let err = Table::from_columns(vec![
            Column::new("a".into(), [1i64, 2]),
            Column::new("b".into(), [1i64]),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = Table::from_columns(vec![
            Column::new("a".into(), [1i64]),
            Column::new("a".into(), [2i64]),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn normalizes_numeric_types_and_nan() {
        let table = table(df!(
            "small" => [1i32, 2],
            "ratio" => [1.5f32, f32::NAN],
        ));
        assert_eq!(table.dtype("small"), Some(DType::Int));
        assert_eq!(table.frame().column("small").expect("small").dtype(), &DataType::Int64);

        let ratio = table.column("ratio").expect("ratio");
        assert_eq!(ratio.dtype(), &DataType::Float64);
        assert_eq!(ratio.null_count(), 1);
    }

    #[test]
    fn duplicate_count_ignores_first_occurrence() {
        let table = table(df!(
            "a" => [Some(1i64), Some(1), None, None],
            "b" => [2i64, 2, 3, 3],
        ));
        assert_eq!(table.duplicate_count().expect("duplicates"), 2);

        let unique = table.drop_duplicates().expect("drop duplicates");
        assert_eq!(unique.row_count(), 2);
        let a = unique.column("a").expect("a").as_materialized_series().clone();
        assert_eq!(a.i64().expect("ints").into_iter().collect::<Vec<_>>(), vec![Some(1), None]);
    }

    #[test]
    fn take_rows_keeps_requested_order() {
        let table = table(df!("a" => [10i64, 20, 30]));
        let taken = table.take_rows(&[2, 0]).expect("take rows");
        let a = taken.column("a").expect("a").as_materialized_series().clone();
        assert_eq!(a.i64().expect("ints").into_iter().collect::<Vec<_>>(), vec![Some(30), Some(10)]);
    }

    #[test]
    fn without_column_reports_missing() {
        let table = table(df!("a" => [1i64]));
        let err = table.without_column("zzz").unwrap_err();
        assert!(matches!(err, Error::MissingColumn(name) if name == "zzz"));
        let dropped = table.without_column("a").expect("drop column");
        assert_eq!(dropped.column_count(), 0);
        assert_eq!(table.column_count(), 1);
    }

    #[test]
    fn empty_table_has_no_rows() {
        let table = Table::default();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.duplicate_count().expect("duplicates"), 0);
    }
}
