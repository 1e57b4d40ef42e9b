use schemars::schema::RootSchema;
use schemars::schema_for;

use cleanroom_fix::FixOperation;

use crate::model::Report;

/// Emit the JSON Schema for exported reports.
pub fn report_json_schema() -> RootSchema {
    schema_for!(Report)
}

/// Emit the JSON Schema for a fix list (`[FixOperation]`).
pub fn fix_list_json_schema() -> RootSchema {
    schema_for!(Vec<FixOperation>)
}
