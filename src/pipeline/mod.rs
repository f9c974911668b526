//! Pipeline orchestration for record comparisons.
//!
//! Shared load → diff → report steps used by the CLI command handlers.

mod diff_stage;
mod load;
mod output;
mod report_stage;

pub use diff_stage::{compute_diff, MatchPlan};
pub use load::load_records_with_context;
pub use output::{should_use_color, write_output, OutputTarget};
pub use report_stage::{build_report_config, output_report};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected (or no fail flag set)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected and a fail flag was set
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
