//! Record document loading stage.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Load a record document with the path in any error message.
pub fn load_records_with_context(path: &Path, quiet: bool) -> Result<Vec<Value>> {
    if !quiet {
        tracing::info!("Loading records: {:?}", path);
    }

    let records = crate::records::load_records(path)
        .with_context(|| format!("Failed to load records: {}", path.display()))?;

    if !quiet {
        tracing::info!("Loaded {} records", records.len());
    }
    Ok(records)
}
