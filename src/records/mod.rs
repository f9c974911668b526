//! JSON record documents.
//!
//! Adapts JSON input to the diff engine: a document is an array of objects,
//! keys are built from one or more fields and equality compares selected
//! fields (or whole records).

use crate::equality::{Equality, EqualityPair};
use crate::error::{CmpError, ErrorContext, RecordsErrorKind, Result};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

static NULL: Value = Value::Null;

/// Load a record document from a file.
pub fn load_records(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path).map_err(|e| CmpError::io(path, e))?;
    parse_records(&content).with_context(|| format!("reading {}", path.display()))
}

/// Parse a record document: a JSON array whose elements are all objects.
pub fn parse_records(content: &str) -> Result<Vec<Value>> {
    let document: Value = serde_json::from_str(content).map_err(|e| {
        CmpError::records("parsing record document", RecordsErrorKind::InvalidJson(e.to_string()))
    })?;

    let Value::Array(records) = document else {
        return Err(CmpError::records(
            "parsing record document",
            RecordsErrorKind::NotAnArray {
                found: json_type_name(&document).to_string(),
            },
        ));
    };

    if let Some(index) = records.iter().position(|r| !r.is_object()) {
        return Err(CmpError::records(
            "parsing record document",
            RecordsErrorKind::NotAnObject { index },
        ));
    }

    tracing::debug!("Parsed {} records", records.len());
    Ok(records)
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Field paths
// ============================================================================

/// Dotted path to a value inside a record, e.g. `address.city`.
///
/// Numeric segments also index into arrays (`tags.0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted path. Empty paths and empty segments are rejected.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(CmpError::invalid_configuration("field path must not be empty"));
        }
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(CmpError::invalid_configuration(format!(
                "field path '{path}' has an empty segment"
            )));
        }
        Ok(Self {
            raw: path.to_string(),
            segments,
        })
    }

    /// Resolve this path in `record`. Missing fields resolve to `null`.
    pub fn resolve<'v>(&self, record: &'v Value) -> &'v Value {
        let mut current = record;
        for segment in &self.segments {
            let next = match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            match next {
                Some(value) => current = value,
                None => return &NULL,
            }
        }
        current
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for FieldPath {
    type Err = CmpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse a list of dotted paths.
pub fn parse_paths<S: AsRef<str>>(paths: &[S]) -> Result<Vec<FieldPath>> {
    paths.iter().map(|p| FieldPath::parse(p.as_ref())).collect()
}

// ============================================================================
// Keys
// ============================================================================

/// Composite key of a record: the canonical JSON text of each key field.
///
/// Two records share a key when every key field serializes identically, so
/// `1` and `"1"` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey(Vec<String>);

impl RecordKey {
    /// The canonical JSON text of each key field, in field order.
    pub fn parts(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => f.write_str(single),
            parts => write!(f, "({})", parts.join(", ")),
        }
    }
}

/// Builds a [`RecordKey`] from a fixed list of fields.
#[derive(Debug, Clone)]
pub struct RecordKeyExtractor {
    fields: Vec<FieldPath>,
}

impl RecordKeyExtractor {
    /// Create an extractor over `fields`. At least one field is required.
    pub fn new(fields: Vec<FieldPath>) -> Result<Self> {
        if fields.is_empty() {
            return Err(CmpError::invalid_configuration(
                "at least one key field is required",
            ));
        }
        Ok(Self { fields })
    }

    /// Create an extractor from dotted path strings.
    pub fn from_paths<S: AsRef<str>>(paths: &[S]) -> Result<Self> {
        Self::new(parse_paths(paths)?)
    }

    /// Extract the key of `record`.
    pub fn key_of(&self, record: &Value) -> RecordKey {
        RecordKey(
            self.fields
                .iter()
                .map(|field| field.resolve(record).to_string())
                .collect(),
        )
    }

    pub fn fields(&self) -> &[FieldPath] {
        &self.fields
    }
}

// ============================================================================
// Equality
// ============================================================================

/// Build the equality policy for records.
///
/// With no fields, whole records are compared. Otherwise the i-th base field
/// is compared with the i-th working field and all must match.
pub fn record_equality(
    base_fields: &[FieldPath],
    working_fields: &[FieldPath],
) -> Result<Equality<Value, Value>> {
    if base_fields.len() != working_fields.len() {
        return Err(CmpError::invalid_configuration(format!(
            "{} base equality fields but {} working equality fields",
            base_fields.len(),
            working_fields.len()
        )));
    }

    let pairs = base_fields.iter().zip(working_fields).map(|(base, working)| {
        let (b, w) = (base.clone(), working.clone());
        EqualityPair::by(move |bv: &Value, wv: &Value| b.resolve(bv) == w.resolve(wv))
            .named(format!("{base}={working}"))
    });
    Ok(Equality::fields(pairs))
}
