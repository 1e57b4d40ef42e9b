use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Profile contract version. Bump when a field is added, renamed or retyped.
pub const PROFILE_VERSION: &str = "1.0";

/// Structural and statistical snapshot of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Profile {
    pub profile_version: String,
    pub dataset: DatasetSummary,
    /// Per-column metrics, in table column order.
    pub columns: IndexMap<String, ColumnProfile>,
    /// Fully duplicated rows among the rows used for the computation
    /// (the sample when `dataset.sampled` is set).
    pub duplicates: u64,
}

impl Profile {
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.get(name)
    }

    /// Total row count of the profiled table.
    pub fn rows(&self) -> u64 {
        self.dataset.rows
    }
}

/// Dataset-level summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DatasetSummary {
    pub rows: u64,
    pub cols: u64,
    /// Estimated in-memory size of the table.
    pub memory_bytes: u64,
    /// Whether the duplicate count was computed on a sample.
    pub sampled: bool,
    /// Rows used for the duplicate count.
    pub sample_size: u64,
}

/// Column-level metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnProfile {
    /// Declared type label (`int64`, `float64`, `bool`, `string`, `datetime`, `null`).
    pub dtype: String,
    pub missing: u64,
    /// `missing / rows`, or `0.0` for a table without rows.
    pub missing_pct: f64,
    /// Distinct non-null values.
    pub unique: u64,
    pub is_constant: bool,
    /// Present for numeric columns and for columns without any non-null value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericSummary>,
}

/// Summary statistics over the non-null values of a column.
///
/// Non-finite statistics (a column holding infinities) are written as the
/// labels `"inf"`, `"-inf"` and `"NaN"` so the JSON form stays lossless.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NumericSummary {
    #[serde(default, with = "statistic")]
    #[schemars(with = "Option<Statistic>")]
    pub mean: Option<f64>,
    #[serde(default, with = "statistic")]
    #[schemars(with = "Option<Statistic>")]
    pub std: Option<f64>,
    #[serde(default, with = "statistic")]
    #[schemars(with = "Option<Statistic>")]
    pub min: Option<f64>,
    #[serde(default, with = "statistic")]
    #[schemars(with = "Option<Statistic>")]
    pub max: Option<f64>,
    #[serde(default, with = "statistic")]
    #[schemars(with = "Option<Statistic>")]
    pub median: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
enum Statistic {
    Finite(f64),
    NonFinite(NonFinite),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
enum NonFinite {
    #[serde(rename = "inf")]
    Infinity,
    #[serde(rename = "-inf")]
    NegativeInfinity,
    #[serde(rename = "NaN")]
    NaN,
}

impl From<f64> for Statistic {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Statistic::NonFinite(NonFinite::NaN)
        } else if value == f64::INFINITY {
            Statistic::NonFinite(NonFinite::Infinity)
        } else if value == f64::NEG_INFINITY {
            Statistic::NonFinite(NonFinite::NegativeInfinity)
        } else {
            Statistic::Finite(value)
        }
    }
}

impl From<Statistic> for f64 {
    fn from(value: Statistic) -> Self {
        match value {
            Statistic::Finite(value) => value,
            Statistic::NonFinite(NonFinite::Infinity) => f64::INFINITY,
            Statistic::NonFinite(NonFinite::NegativeInfinity) => f64::NEG_INFINITY,
            Statistic::NonFinite(NonFinite::NaN) => f64::NAN,
        }
    }
}

mod statistic {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        value.map(Statistic::from).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Ok(Option::<Statistic>::deserialize(deserializer)?.map(f64::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_statistics_are_plain_numbers() {
        let summary = NumericSummary {
            mean: Some(2.5),
            ..NumericSummary::default()
        };
        let json = serde_json::to_value(&summary).expect("serialize summary");
        assert_eq!(json["mean"], 2.5);
        assert_eq!(json["std"], serde_json::Value::Null);
    }

    #[test]
    fn non_finite_statistics_survive_json() {
        let summary = NumericSummary {
            mean: Some(f64::NAN),
            std: None,
            min: Some(f64::NEG_INFINITY),
            max: Some(f64::INFINITY),
            median: Some(1.0),
        };
        let json = serde_json::to_string(&summary).expect("serialize summary");
        assert!(json.contains(r#""min":"-inf""#));
        assert!(json.contains(r#""max":"inf""#));

        let parsed: NumericSummary = serde_json::from_str(&json).expect("parse summary");
        assert!(parsed.mean.is_some_and(f64::is_nan));
        assert_eq!(parsed.std, None);
        assert_eq!(parsed.min, Some(f64::NEG_INFINITY));
        assert_eq!(parsed.max, Some(f64::INFINITY));
        assert_eq!(parsed.median, Some(1.0));
    }
}
