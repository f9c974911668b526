//! Configuration types for collection-cmp operations.
//!
//! Provides structured configuration for the diff and check-keys commands.

use crate::partition::CollisionPolicy;
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// File settings are loaded first; CLI arguments are merged over them with
/// [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Key and equality configuration
    pub matching: MatchingConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the key fields used on both sides.
    pub fn key_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.config.matching.key_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the key fields used on the working side only.
    pub fn working_key_fields<S: Into<String>>(
        mut self,
        fields: impl IntoIterator<Item = S>,
    ) -> Self {
        self.config.matching.working_key_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the fields compared to decide equality.
    pub fn equality_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.config.matching.equality_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the working-side counterparts of the equality fields.
    pub fn working_equality_fields<S: Into<String>>(
        mut self,
        fields: impl IntoIterator<Item = S>,
    ) -> Self {
        self.config.matching.working_equality_fields =
            fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the duplicate key policy.
    pub const fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.config.matching.collision_policy = policy;
        self
    }

    /// Partition both inputs concurrently.
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.config.matching.parallel = parallel;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Include unchanged records in output.
    pub const fn include_unchanged(mut self, include: bool) -> Self {
        self.config.output.include_unchanged = include;
        self
    }

    /// Cap the records listed per change kind.
    pub const fn max_items(mut self, max: Option<usize>) -> Self {
        self.config.output.max_items = max;
        self
    }

    /// Report counts only.
    pub const fn summary_only(mut self, summary_only: bool) -> Self {
        self.config.output.summary_only = summary_only;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable fail-on-difference mode.
    pub const fn fail_on_difference(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_difference = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Command-specific Configuration Types
// ============================================================================

/// Configuration for diff operations
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Paths to compare
    pub paths: DiffPaths,
    /// Key and equality configuration
    pub matching: MatchingConfig,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl DiffConfig {
    /// Combine input paths with an application configuration.
    #[must_use]
    pub fn from_app(paths: DiffPaths, app: AppConfig) -> Self {
        Self {
            paths,
            matching: app.matching,
            output: app.output,
            behavior: app.behavior,
        }
    }
}

/// Paths for diff operation
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Path to the base record document
    pub base: PathBuf,
    /// Path to the working record document
    pub working: PathBuf,
}

/// Configuration for key checks
#[derive(Debug, Clone)]
pub struct CheckKeysConfig {
    /// Path to the record document
    pub path: PathBuf,
    /// Key fields to check
    pub key_fields: Vec<String>,
    /// Suppress the listing of colliding keys
    pub quiet: bool,
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Key and equality configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MatchingConfig {
    /// Dotted key field paths used on both sides
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub key_fields: Vec<String>,
    /// Key fields for the base side, overriding `key_fields`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub base_key_fields: Vec<String>,
    /// Key fields for the working side, overriding `key_fields`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub working_key_fields: Vec<String>,
    /// Fields compared to decide equality; empty compares whole records
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub equality_fields: Vec<String>,
    /// Working-side counterparts of `equality_fields`, position by position
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub working_equality_fields: Vec<String>,
    /// What to do with records sharing a key within one document
    pub collision_policy: CollisionPolicy,
    /// Partition both documents concurrently
    pub parallel: bool,
}

impl MatchingConfig {
    /// Key fields in effect for the base side.
    #[must_use]
    pub fn base_keys(&self) -> &[String] {
        if self.base_key_fields.is_empty() {
            &self.key_fields
        } else {
            &self.base_key_fields
        }
    }

    /// Key fields in effect for the working side.
    #[must_use]
    pub fn working_keys(&self) -> &[String] {
        if self.working_key_fields.is_empty() {
            &self.key_fields
        } else {
            &self.working_key_fields
        }
    }

    /// Equality fields in effect for the working side.
    #[must_use]
    pub fn working_equality(&self) -> &[String] {
        if self.working_equality_fields.is_empty() {
            &self.equality_fields
        } else {
            &self.working_equality_fields
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// Include unchanged records in output
    pub include_unchanged: bool,
    /// Maximum records listed per change kind in text reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    /// Report counts only, without listing records
    pub summary_only: bool,
}

/// Behavior flags for diff operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any record was added, removed or updated
    pub fail_on_change: bool,
    /// Exit with code 1 if any record was added or removed
    pub fail_on_difference: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}
