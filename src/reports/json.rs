//! JSON report generator.

use super::{RecordDiff, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ChangeKind, ClassifiedPair, DiffSummary};
use crate::records::RecordKey;
use serde::Serialize;
use serde_json::Value;

/// JSON report generator
#[derive(Debug, Default)]
pub struct JsonReporter;

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(
        &self,
        result: &RecordDiff<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let report = DiffReport::build(result, config);
        serde_json::to_string_pretty(&report)
            .map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// ============================================================================
// JSON report structures
// ============================================================================

/// Serializable view of a record diff.
#[derive(Debug, Serialize)]
pub struct DiffReport<'r> {
    pub metadata: ReportInfo<'r>,
    pub summary: DiffSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<ReportEntry<'r>>>,
}

#[derive(Debug, Serialize)]
pub struct ReportInfo<'r> {
    pub tool: ToolInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<&'r str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working: Option<&'r str>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub key_fields: &'r [String],
}

#[derive(Debug, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// One classified record in a JSON report.
#[derive(Debug, Serialize)]
pub struct ReportEntry<'r> {
    pub kind: ChangeKind,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<&'r Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working: Option<&'r Value>,
}

impl<'r> ReportEntry<'r> {
    fn from_pair(pair: &ClassifiedPair<'r, RecordKey, Value, Value>) -> Self {
        Self {
            kind: pair.kind(),
            key: pair.key().to_string(),
            base: pair.base(),
            working: pair.working(),
        }
    }
}

impl<'r> DiffReport<'r> {
    /// Build the report view over `result`.
    pub fn build(result: &RecordDiff<'r>, config: &'r ReportConfig) -> Self {
        let entries = (!config.summary_only).then(|| {
            result
                .iter()
                .filter(|pair| pair.kind().is_change() || config.include_unchanged)
                .map(ReportEntry::from_pair)
                .collect()
        });

        Self {
            metadata: ReportInfo {
                tool: ToolInfo {
                    name: env!("CARGO_PKG_NAME").to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
                base: config.metadata.base_path.as_deref(),
                working: config.metadata.working_path.as_deref(),
                key_fields: &config.metadata.key_fields,
            },
            summary: result.summary(),
            entries,
        }
    }
}
