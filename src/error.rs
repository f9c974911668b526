//! Unified error types for collection-cmp.
//!
//! Every failure in this crate is a caller input error: comparisons are pure
//! and deterministic, so nothing here is retried or recovered internally.

use crate::partition::Side;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for collection-cmp operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CmpError {
    /// Errors while partitioning a collection by key
    #[error("Partitioning failed: {context}")]
    Partition {
        context: String,
        #[source]
        source: PartitionErrorKind,
    },

    /// Equality or key configuration that cannot be evaluated
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Errors while reading record documents
    #[error("Failed to read records: {context}")]
    Records {
        context: String,
        #[source]
        source: RecordsErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific partition error kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PartitionErrorKind {
    #[error("2 or more items in the {side} collection have the same key: {key}")]
    KeyCollision { key: String, side: Side },
}

/// Specific record document error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RecordsErrorKind {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Expected a JSON array of records, found {found}")]
    NotAnArray { found: String },

    #[error("Record at index {index} is not a JSON object")]
    NotAnObject { index: usize },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for collection-cmp operations
pub type Result<T> = std::result::Result<T, CmpError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl CmpError {
    /// Create a key collision error for one side of a comparison
    pub fn key_collision(key: impl Into<String>, side: Side) -> Self {
        Self::Partition {
            context: format!("partitioning {side} collection"),
            source: PartitionErrorKind::KeyCollision {
                key: key.into(),
                side,
            },
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Create a records error with context
    pub fn records(context: impl Into<String>, source: RecordsErrorKind) -> Self {
        Self::Records {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// The colliding key and side, if this is a key collision.
    #[must_use]
    pub fn as_key_collision(&self) -> Option<(&str, Side)> {
        match self {
            Self::Partition {
                source: PartitionErrorKind::KeyCollision { key, side },
                ..
            } => Some((key.as_str(), *side)),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for CmpError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for CmpError {
    fn from(err: serde_json::Error) -> Self {
        Self::records(
            "JSON deserialization",
            RecordsErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are prepended to the existing context, so a failure deep
/// in a call chain reads `outer: middle: inner`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on the error path.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<CmpError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: CmpError, new_ctx: &str) -> CmpError {
    match err {
        CmpError::Partition {
            context: existing,
            source,
        } => CmpError::Partition {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CmpError::Records {
            context: existing,
            source,
        } => CmpError::Records {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CmpError::Io {
            path,
            message,
            source,
        } => CmpError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        CmpError::InvalidConfiguration(msg) => {
            CmpError::InvalidConfiguration(chain_context(new_ctx, &msg))
        }
        CmpError::Validation(msg) => CmpError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| CmpError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| CmpError::Validation(f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_collision_display() {
        let err = CmpError::key_collision("\"k\"", Side::Base);
        let display = err.to_string();
        assert!(display.contains("base"), "should name the side: {display}");

        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("2 or more items in the base collection have the same key: \"k\"")
        );
    }

    #[test]
    fn test_as_key_collision() {
        let err = CmpError::key_collision("7", Side::Working);
        assert_eq!(err.as_key_collision(), Some(("7", Side::Working)));
        assert!(CmpError::validation("nope").as_key_collision().is_none());
    }

    #[test]
    fn test_error_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CmpError::io("/path/to/base.json", io_err);

        assert!(err.to_string().contains("/path/to/base.json"));
    }

    #[test]
    fn test_context_chaining() {
        let initial_err: Result<()> = Err(CmpError::records(
            "initial context",
            RecordsErrorKind::NotAnObject { index: 3 },
        ));

        match initial_err.context("outer context") {
            Err(CmpError::Records { context, .. }) => {
                assert_eq!(context, "outer context: initial context");
            }
            other => panic!("Expected Records error, got {other:?}"),
        }
    }

    #[test]
    fn test_context_keeps_collision_kind() {
        let err: Result<()> = Err(CmpError::key_collision("1", Side::Base));
        let err = err.context("diffing users").unwrap_err();
        assert_eq!(err.as_key_collision(), Some(("1", Side::Base)));
        assert!(err.to_string().contains("diffing users"));
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(CmpError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_option_context() {
        let some_value: Option<i32> = Some(42);
        assert_eq!(some_value.context_none("missing value").unwrap(), 42);

        let none_value: Option<i32> = None;
        match none_value.context_none("missing value") {
            Err(CmpError::Validation(msg)) => assert_eq!(msg, "missing value"),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
