//! Configuration module for collection-cmp.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use collection_cmp::config::{AppConfig, Validatable};
//!
//! let config = AppConfig::builder()
//!     .key_fields(["id"])
//!     .equality_fields(["price"])
//!     .fail_on_change(true)
//!     .build();
//! assert!(config.is_valid());
//! ```
//!
//! # Configuration File
//!
//! Place a `.collection-cmp.yaml` file in your working directory or
//! `~/.config/collection-cmp/`:
//!
//! ```yaml
//! matching:
//!   key_fields: [id]
//!   equality_fields: [price, stock]
//!   collision_policy: fail-fast
//! behavior:
//!   fail_on_change: true
//! ```

pub mod file;
mod types;
mod validation;

// Re-export main types
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, CheckKeysConfig, DiffConfig, DiffPaths,
    MatchingConfig, OutputConfig,
};
pub use validation::{ConfigError, Validatable};

// Re-export file utilities
pub use file::{
    discover_config_file, load_config_file, load_or_default, search_dirs, ConfigFileError,
    ExplicitChoices, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.collection-cmp.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> crate::error::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().expect("schema serializes");
        assert!(schema.contains("matching"));
        assert!(schema.contains("collision_policy"));
        assert!(schema.contains("fail-fast"));
    }
}
