//! Audit trail encoding
//!
//! A terminal rule contributes one extra audit entry: the canonical string
//! form of its result map, `key:value` pairs joined by commas.

use crate::types::Results;

/// Canonical string for a result map
///
/// Keys are sorted so two maps holding the same entries always encode to
/// the same string, whatever order they were filled in.
pub fn canonical_results(results: &Results) -> String {
    let mut entries: Vec<_> = results.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    entries
        .into_iter()
        .map(|(key, value)| format!("{}:{}", key, value))
        .collect::<Vec<_>>()
        .join(",")
}
