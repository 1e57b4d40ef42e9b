use std::fmt;

use polars::prelude::DataType;

/// Column type as seen by the quality pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Int,
    Float,
    Bool,
    Text,
    Temporal,
    /// Column that only holds missing values.
    Null,
}

impl DType {
    /// Map a polars column type; `None` for types a table may not hold.
    pub fn of(dtype: &DataType) -> Option<Self> {
        if dtype.is_integer() {
            return Some(DType::Int);
        }
        if dtype.is_float() {
            return Some(DType::Float);
        }
        match dtype {
            DataType::Boolean => Some(DType::Bool),
            DataType::String => Some(DType::Text),
            DataType::Date | DataType::Datetime(_, _) => Some(DType::Temporal),
            DataType::Null => Some(DType::Null),
            _ => None,
        }
    }

    /// Label reported by the profiler (`int64`, `float64`, ...).
    pub fn label(&self) -> &'static str {
        match self {
            DType::Int => "int64",
            DType::Float => "float64",
            DType::Bool => "bool",
            DType::Text => "string",
            DType::Temporal => "datetime",
            DType::Null => "null",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, DType::Int | DType::Float)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::TimeUnit;

    #[test]
    fn labels_mark_numeric_types() {
        assert!(DType::Int.label().contains("int"));
        assert!(DType::Float.label().contains("float"));
        assert!(!DType::Text.label().contains("int"));
        assert!(!DType::Null.is_numeric());
    }

    #[test]
    fn maps_polars_types() {
        assert_eq!(DType::of(&DataType::Int32), Some(DType::Int));
        assert_eq!(DType::of(&DataType::UInt8), Some(DType::Int));
        assert_eq!(DType::of(&DataType::Float32), Some(DType::Float));
        assert_eq!(DType::of(&DataType::Date), Some(DType::Temporal));
        assert_eq!(
            DType::of(&DataType::Datetime(TimeUnit::Microseconds, None)),
            Some(DType::Temporal)
        );
        assert_eq!(DType::of(&DataType::Null), Some(DType::Null));
        assert_eq!(DType::of(&DataType::List(Box::new(DataType::Int64))), None);
    }
}
