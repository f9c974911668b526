#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the record document parser.
///
/// Feeds arbitrary UTF-8 strings to `parse_records`, which must either
/// reject them or return only JSON objects.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(records) = collection_cmp::parse_records(s) {
            assert!(records.iter().all(serde_json::Value::is_object));
        }
    }
});
