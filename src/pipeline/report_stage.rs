//! Report output stage.

use crate::config::DiffConfig;
use crate::reports::{
    create_reporter_with_options, RecordDiff, ReportConfig, ReportGenerator, ReportMetadata,
};
use anyhow::Result;

use super::{should_use_color, write_output, OutputTarget};

/// Build the report configuration for a diff run.
pub fn build_report_config(config: &DiffConfig) -> ReportConfig {
    ReportConfig {
        include_unchanged: config.output.include_unchanged,
        max_items: config.output.max_items,
        summary_only: config.output.summary_only,
        metadata: ReportMetadata {
            base_path: Some(config.paths.base.to_string_lossy().to_string()),
            working_path: Some(config.paths.working.to_string_lossy().to_string()),
            key_fields: config.matching.base_keys().to_vec(),
            ..ReportMetadata::new()
        },
    }
}

/// Render `result` in the configured format and write it to its destination.
pub fn output_report(config: &DiffConfig, result: &RecordDiff<'_>) -> Result<()> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let use_color = should_use_color(config.output.no_color, &target);
    let reporter = create_reporter_with_options(config.output.format, use_color);

    let report = reporter.generate(result, &build_report_config(config))?;
    write_output(&report, &target, config.behavior.quiet)
}
