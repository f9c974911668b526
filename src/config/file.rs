//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::partition::CollisionPolicy;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".collection-cmp.yaml",
    ".collection-cmp.yml",
    "collection-cmp.yaml",
];

/// Directory name under the user config directory.
const CONFIG_DIR_NAME: &str = "collection-cmp";

/// Directories searched for config files, in order.
#[must_use]
pub fn search_dirs() -> Vec<PathBuf> {
    [
        std::env::current_dir().ok(),
        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME)),
        dirs::home_dir(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/collection-cmp/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    search_dirs().iter().find_map(|dir| find_config_in_dir(dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    // An empty file is a valid, all-default config.
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

/// Enumerated settings the user picked explicitly.
///
/// [`AppConfig::merge`] cannot tell an explicit default apart from an unset
/// flag, so these are kept as options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplicitChoices {
    /// Duplicate key policy from `--collision`
    pub collision_policy: Option<CollisionPolicy>,
    /// Output format from `--output`
    pub format: Option<ReportFormat>,
}

fn override_list(target: &mut Vec<String>, other: &[String]) {
    if !other.is_empty() {
        target.clear();
        target.extend_from_slice(other);
    }
}

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Lists and options override only when set; booleans override only when
    /// true. This is useful for layering CLI args over file config.
    pub fn merge(&mut self, other: &Self) {
        // Matching config
        override_list(&mut self.matching.key_fields, &other.matching.key_fields);
        override_list(&mut self.matching.base_key_fields, &other.matching.base_key_fields);
        override_list(
            &mut self.matching.working_key_fields,
            &other.matching.working_key_fields,
        );
        override_list(&mut self.matching.equality_fields, &other.matching.equality_fields);
        override_list(
            &mut self.matching.working_equality_fields,
            &other.matching.working_equality_fields,
        );
        if other.matching.collision_policy != CollisionPolicy::default() {
            self.matching.collision_policy = other.matching.collision_policy;
        }
        if other.matching.parallel {
            self.matching.parallel = true;
        }

        // Output config - only override if explicitly set
        if other.output.format != ReportFormat::default() {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }
        if other.output.include_unchanged {
            self.output.include_unchanged = true;
        }
        if other.output.max_items.is_some() {
            self.output.max_items = other.output.max_items;
        }
        if other.output.summary_only {
            self.output.summary_only = true;
        }

        // Behavior config (booleans - if set to true, override)
        if other.behavior.fail_on_change {
            self.behavior.fail_on_change = true;
        }
        if other.behavior.fail_on_difference {
            self.behavior.fail_on_difference = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Apply choices made explicitly on the command line.
    ///
    /// Unlike [`merge`](Self::merge), a choice wins even when it equals the
    /// default.
    pub fn apply_choices(&mut self, choices: &ExplicitChoices) {
        if let Some(policy) = choices.collision_policy {
            self.matching.collision_policy = policy;
        }
        if let Some(format) = choices.format {
            self.output.format = format;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}
