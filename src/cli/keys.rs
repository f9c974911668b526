//! Check-keys command handler.
//!
//! Reports whether a record document can be partitioned by the given key
//! fields without collisions.

use crate::config::CheckKeysConfig;
use crate::partition::{can_partition, colliding_keys};
use crate::pipeline::{exit_codes, load_records_with_context};
use crate::records::RecordKeyExtractor;
use anyhow::Result;

/// Run the check-keys command, returning the desired exit code.
///
/// Exits with [`exit_codes::CHANGES_DETECTED`] when any two records share a
/// key, listing each colliding key once unless quiet.
#[allow(clippy::needless_pass_by_value)]
pub fn run_check_keys(config: CheckKeysConfig) -> Result<i32> {
    let extractor = RecordKeyExtractor::from_paths(config.key_fields.as_slice())?;
    let records = load_records_with_context(&config.path, config.quiet)?;
    let key_of = |record: &serde_json::Value| extractor.key_of(record);

    if can_partition(&records, key_of) {
        if !config.quiet {
            println!(
                "{}: {} records, all keys unique",
                config.path.display(),
                records.len()
            );
        }
        return Ok(exit_codes::SUCCESS);
    }

    let collisions = colliding_keys(&records, key_of);
    if !config.quiet {
        println!(
            "{}: {} colliding {}",
            config.path.display(),
            collisions.len(),
            if collisions.len() == 1 { "key" } else { "keys" }
        );
        for key in &collisions {
            println!("  {key}");
        }
    }
    Ok(exit_codes::CHANGES_DETECTED)
}
