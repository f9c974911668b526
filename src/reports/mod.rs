//! Report generation for record diff results.
//!
//! This module provides multiple output formats for record diffs:
//! - Summary: Compact shell-friendly output
//! - Table: Aligned tabular terminal output
//! - JSON: Structured data for programmatic integration
//!
//! Reporters render a read-only view of a [`DiffResult`]; the result itself
//! is never serialized.

mod json;
mod summary;
mod types;

pub use json::{DiffReport, JsonReporter, ReportEntry};
pub use summary::{SummaryReporter, TableReporter};
pub use types::{ReportConfig, ReportFormat, ReportMetadata};

use crate::diff::DiffResult;
use crate::records::RecordKey;
use serde_json::Value;
use std::io::Write;
use thiserror::Error;

/// Diff result over JSON records, as produced by the CLI.
pub type RecordDiff<'a> = DiffResult<'a, RecordKey, Value, Value>;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report from a diff result
    fn generate(&self, result: &RecordDiff<'_>, config: &ReportConfig)
        -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_report(
        &self,
        result: &RecordDiff<'_>,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate(result, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Table => {
            if use_color {
                Box::new(TableReporter::new())
            } else {
                Box::new(TableReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
