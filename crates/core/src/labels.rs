//! First-label extraction for legacy classifier output.
//!
//! One classifier variant emits entries shaped `"<id>: '<primary>, <alt>, ...'"`
//! (its native ImageNet class strings). This is a fixed external format we
//! parse exactly; only the primary label is kept.

use tracing::error;

/// Extract the first human-readable label from each entry.
///
/// Malformed entries (no `:` separator) are skipped, never aborting the
/// batch. Output order follows input order and duplicates are kept, since
/// confidence ranking is meaningful.
pub fn extract_first(entries: &[String]) -> Vec<String> {
    let mut result = Vec::with_capacity(entries.len());
    for entry in entries {
        match first_label(entry) {
            Some(label) => result.push(label),
            None => {
                error!(entry = entry.as_str(), "failed to parse label entry, skipping");
            }
        }
    }
    result
}

/// Normalize a decoded payload for display: entries with a numeric id
/// prefix go through extraction, anything else passes through unchanged.
/// Historical rows mix both shapes.
pub fn normalize_entries(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            if has_numeric_prefix(entry) {
                first_label(entry).unwrap_or_else(|| entry.clone())
            } else {
                entry.clone()
            }
        })
        .collect()
}

fn first_label(entry: &str) -> Option<String> {
    let (_, rest) = entry.split_once(':')?;
    let label_str = strip_one_quote_layer(rest.trim());
    let first = label_str.split(',').next()?.trim();
    Some(first.to_string())
}

/// Strip one layer of surrounding single or double quotes.
fn strip_one_quote_layer(s: &str) -> &str {
    let s = s
        .strip_prefix('\'')
        .or_else(|| s.strip_prefix('"'))
        .unwrap_or(s);
    s.strip_suffix('\'')
        .or_else(|| s.strip_suffix('"'))
        .unwrap_or(s)
}

fn has_numeric_prefix(entry: &str) -> bool {
    match entry.split_once(':') {
        Some((prefix, _)) => {
            let prefix = prefix.trim();
            !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
