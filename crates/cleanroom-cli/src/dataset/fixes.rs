use std::path::Path;

use jsonschema::JSONSchema;
use serde_json::Value;
use tracing::debug;

use cleanroom::FixOperation;
use cleanroom_report::fix_list_json_schema;

use super::{DatasetError, DatasetResult};

/// Read a JSON fix list and check it against the fix-list JSON Schema.
///
/// Operation identifiers are not checked here; the applier rejects unknown
/// ones before running any fix.
pub fn load_fix_list(path: &Path) -> DatasetResult<Vec<FixOperation>> {
    let content = std::fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&content)?;

    let schema = serde_json::to_value(fix_list_json_schema())?;
    let compiled =
        JSONSchema::compile(&schema).map_err(|err| DatasetError::Schema(err.to_string()))?;

    if let Err(errors) = compiled.validate(&document) {
        let issues = errors
            .map(|error| {
                let path = error.instance_path.to_string();
                let path = if path.is_empty() { "/".to_string() } else { path };
                format!("{path}: {error}")
            })
            .collect::<Vec<_>>();
        return Err(DatasetError::InvalidFixes(issues));
    }

    let fixes: Vec<FixOperation> = serde_json::from_value(document)?;
    debug!(path = %path.display(), fixes = fixes.len(), "fix list loaded");
    Ok(fixes)
}
