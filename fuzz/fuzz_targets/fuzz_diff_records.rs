#![no_main]
use collection_cmp::records::{parse_records, record_equality, FieldPath, RecordKeyExtractor};
use collection_cmp::DiffEngine;
use libfuzzer_sys::fuzz_target;

/// Fuzz the diff over parsed documents.
///
/// The input is split at the first NUL byte into a base and a working
/// document. Any pair that parses must diff without panicking and satisfy
/// the count identities.
fuzz_target!(|data: &[u8]| {
    let Some(split) = data.iter().position(|&b| b == 0) else {
        return;
    };
    let (Ok(base), Ok(working)) = (
        std::str::from_utf8(&data[..split]),
        std::str::from_utf8(&data[split + 1..]),
    ) else {
        return;
    };
    let (Ok(base), Ok(working)) = (parse_records(base), parse_records(working)) else {
        return;
    };

    let Ok(keys) = RecordKeyExtractor::from_paths(&["id"]) else {
        return;
    };
    let Ok(value) = FieldPath::parse("value") else {
        return;
    };
    let Ok(equality) = record_equality(&[value.clone()], &[value]) else {
        return;
    };

    if let Ok(result) = DiffEngine::new().diff_same(&base, &working, |r| keys.key_of(r), &equality)
    {
        assert_eq!(
            result.changes_count(),
            result.removed().len() + result.added().len() + result.updated().len()
        );
    }
});
