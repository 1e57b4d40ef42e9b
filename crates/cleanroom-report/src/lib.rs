//! Report aggregation and export for cleanroom.

pub mod errors;
pub mod export;
pub mod markdown;
pub mod model;
pub mod schema;

pub use errors::{ReportError, Result};
pub use export::{JsonExporter, ReportFormat, to_json_string, write_text};
pub use markdown::render_markdown;
pub use model::{Report, ReportBuilder};
pub use schema::{fix_list_json_schema, report_json_schema};
