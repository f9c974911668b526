//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two record documents.

use crate::config::{DiffConfig, Validatable};
use crate::pipeline::{
    compute_diff, exit_codes, load_records_with_context, output_report, MatchPlan,
};
use crate::reports::RecordDiff;
use anyhow::Result;

/// Run the diff command, returning the desired exit code.
///
/// The configuration is validated and turned into a match plan before either
/// document is read, so configuration errors never depend on input data.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;

    config.matching.ensure_valid()?;
    config.output.ensure_valid()?;
    let plan = MatchPlan::from_config(&config.matching)?;

    let base = load_records_with_context(&config.paths.base, quiet)?;
    let working = load_records_with_context(&config.paths.working, quiet)?;

    let result = compute_diff(&config, &plan, &base, &working)?;
    output_report(&config, &result)?;

    Ok(determine_exit_code(&config, &result))
}

/// Determine the appropriate exit code based on diff results and config flags.
fn determine_exit_code(config: &DiffConfig, result: &RecordDiff<'_>) -> i32 {
    if config.behavior.fail_on_change && result.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    if config.behavior.fail_on_difference && result.has_differences() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}
