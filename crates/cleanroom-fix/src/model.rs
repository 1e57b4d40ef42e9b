use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::FixError;

/// Operation parameters. No built-in operation reads any yet.
pub type Params = BTreeMap<String, serde_json::Value>;

/// An approved, executable fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FixOperation {
    /// Operation identifier (ex.: `drop_column`).
    pub operation: String,
    /// Target column; required for column-scoped operations.
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub params: Params,
}

impl FixOperation {
    pub fn new(kind: FixKind, column: Option<&str>) -> Self {
        Self {
            operation: kind.as_str().to_string(),
            column: column.map(str::to_string),
            params: Params::new(),
        }
    }

    /// Resolve the operation identifier against the registry.
    pub fn kind(&self) -> Result<FixKind, FixError> {
        self.operation.parse()
    }
}

/// Closed set of supported fix operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FixKind {
    DropColumn,
    ImputeMean,
    ImputeMedian,
    ImputeMode,
    StripStrings,
    DropDuplicates,
}

impl FixKind {
    pub const ALL: [FixKind; 6] = [
        FixKind::DropColumn,
        FixKind::ImputeMean,
        FixKind::ImputeMedian,
        FixKind::ImputeMode,
        FixKind::StripStrings,
        FixKind::DropDuplicates,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FixKind::DropColumn => "drop_column",
            FixKind::ImputeMean => "impute_mean",
            FixKind::ImputeMedian => "impute_median",
            FixKind::ImputeMode => "impute_mode",
            FixKind::StripStrings => "strip_strings",
            FixKind::DropDuplicates => "drop_duplicates",
        }
    }

    /// Dataset-level operations ignore the `column` field.
    pub fn is_column_scoped(&self) -> bool {
        !matches!(self, FixKind::DropDuplicates)
    }
}

impl FromStr for FixKind {
    type Err = FixError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FixKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| FixError::UnknownOperation(value.to_string()))
    }
}

impl fmt::Display for FixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_match_serde_names() {
        for kind in FixKind::ALL {
            let json = serde_json::to_value(kind).expect("serialize kind");
            assert_eq!(json, serde_json::Value::String(kind.as_str().to_string()));
            assert_eq!(kind.as_str().parse::<FixKind>().expect("parse kind"), kind);
        }
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        let err = "explode".parse::<FixKind>().unwrap_err();
        assert!(matches!(err, FixError::UnknownOperation(op) if op == "explode"));
    }

    #[test]
    fn operation_deserializes_with_defaults() {
        let op: FixOperation =
            serde_json::from_str(r#"{"operation":"drop_duplicates"}"#).expect("parse fix");
        assert_eq!(op.column, None);
        assert!(op.params.is_empty());
        assert_eq!(op.kind().expect("kind"), FixKind::DropDuplicates);
    }
}
