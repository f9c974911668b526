//! Configuration validation for collection-cmp.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BehaviorConfig, MatchingConfig, OutputConfig};
use crate::error::CmpError;
use crate::records::FieldPath;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validate, folding every problem into one configuration error.
    fn ensure_valid(&self) -> crate::error::Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(CmpError::invalid_configuration(joined))
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.matching.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

fn validate_paths(field: &str, paths: &[String], errors: &mut Vec<ConfigError>) {
    for path in paths {
        if let Err(e) = FieldPath::parse(path) {
            errors.push(ConfigError {
                field: field.to_string(),
                message: e.to_string(),
            });
        }
    }
}

impl Validatable for MatchingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        validate_paths("matching.key_fields", &self.key_fields, &mut errors);
        validate_paths("matching.base_key_fields", &self.base_key_fields, &mut errors);
        validate_paths("matching.working_key_fields", &self.working_key_fields, &mut errors);
        validate_paths("matching.equality_fields", &self.equality_fields, &mut errors);
        validate_paths(
            "matching.working_equality_fields",
            &self.working_equality_fields,
            &mut errors,
        );

        if self.base_keys().is_empty() || self.working_keys().is_empty() {
            errors.push(ConfigError {
                field: "matching.key_fields".to_string(),
                message: "At least one key field is required".to_string(),
            });
        } else if self.base_keys().len() != self.working_keys().len() {
            errors.push(ConfigError {
                field: "matching.working_key_fields".to_string(),
                message: format!(
                    "Base side has {} key fields but working side has {}",
                    self.base_keys().len(),
                    self.working_keys().len()
                ),
            });
        }

        if self.working_equality().len() != self.equality_fields.len() {
            errors.push(ConfigError {
                field: "matching.working_equality_fields".to_string(),
                message: format!(
                    "Expected {} working equality fields to pair with equality_fields, got {}",
                    self.equality_fields.len(),
                    self.working_equality().len()
                ),
            });
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        // Validate output file path if specified
        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError {
                        field: "output.file".to_string(),
                        message: format!("Parent directory does not exist: {}", parent.display()),
                    });
                }
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        // All boolean flags are independent; nothing to cross-check.
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn matching(keys: &[&str]) -> MatchingConfig {
        MatchingConfig {
            key_fields: keys.iter().map(ToString::to_string).collect(),
            ..MatchingConfig::default()
        }
    }

    #[test]
    fn test_valid_matching_config() {
        assert!(matching(&["id"]).is_valid());
    }

    #[test]
    fn test_missing_keys() {
        let errors = matching(&[]).validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "matching.key_fields");
    }

    #[test]
    fn test_invalid_key_path() {
        let errors = matching(&["a..b"]).validate();
        assert!(errors.iter().any(|e| e.field == "matching.key_fields"));
    }

    #[test]
    fn test_key_arity_mismatch() {
        let config = MatchingConfig {
            working_key_fields: vec!["a".into(), "b".into()],
            ..matching(&["id"])
        };
        let errors = config.validate();
        assert!(errors
            .iter()
            .any(|e| e.field == "matching.working_key_fields"));
    }

    #[test]
    fn test_equality_arity_mismatch() {
        let config = MatchingConfig {
            equality_fields: vec!["a".into()],
            working_equality_fields: vec!["a".into(), "b".into()],
            ..matching(&["id"])
        };
        assert!(!config.is_valid());

        let err = config.ensure_valid().unwrap_err();
        assert!(matches!(err, CmpError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_output_parent_must_exist() {
        let config = OutputConfig {
            file: Some(PathBuf::from("/nonexistent-dir-for-test/out.json")),
            ..OutputConfig::default()
        };
        assert!(!config.is_valid());
        assert!(OutputConfig::default().is_valid());
    }

    #[test]
    fn test_app_config_collects_all_sections() {
        let config = AppConfig {
            output: OutputConfig {
                file: Some(PathBuf::from("/nonexistent-dir-for-test/out.json")),
                ..OutputConfig::default()
            },
            ..AppConfig::default()
        };
        assert_eq!(config.validate().len(), 2);
    }
}
