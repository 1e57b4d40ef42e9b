use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::errors::{ReportError, Result};
use crate::markdown::render_markdown;
use crate::model::Report;

/// Output format for an exported report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "markdown",
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "md",
        }
    }

    /// Render `report` in this format.
    pub fn render(&self, report: &Report) -> Result<String> {
        match self {
            ReportFormat::Json => to_json_string(report),
            ReportFormat::Markdown => Ok(render_markdown(report)),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            _ => Err(ReportError::UnsupportedFormat(value.to_string())),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializes reports as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }

    /// Serialize `report`, writing it to `path` when given.
    ///
    /// The JSON text is returned in both cases.
    pub fn export(&self, report: &Report, path: Option<&Path>) -> Result<String> {
        let json = ReportFormat::Json.render(report)?;
        if let Some(path) = path {
            write_text(path, &json)?;
        }
        Ok(json)
    }
}

/// Pretty-print `value` as JSON with a four-space indent.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|err| ReportError::Encoding(err.to_string()))
}

/// Write `contents` to `path`, creating missing parent directories.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    info!(path = %path.display(), bytes = contents.len(), "report written");
    Ok(())
}
