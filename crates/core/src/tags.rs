//! Tag payload decoding.
//!
//! Persisted tag payloads were written by several generations of code with
//! different serialization habits: a native JSON array, a JSON-encoded
//! string of an array, a double-encoded string (an old double-`to_string`
//! bug), or a hand-concatenated string with mangled quoting. Decoding is
//! centralized here as an ordered fallback chain so call sites never have
//! to care which generation wrote a row.

use serde_json::Value;
use tracing::warn;

/// Decode a raw tag payload into the canonical ordered label list.
///
/// An array value passes through unchanged; a string value goes through
/// the fallback chain. Anything else decodes to an empty list, so a
/// malformed payload degrades rather than failing the read path.
pub fn decode_tags(raw: &Value) -> Vec<String> {
    match raw {
        Value::Array(items) => collect_labels(items),
        Value::String(s) => decode_tags_str(s),
        Value::Null => Vec::new(),
        other => {
            warn!(payload = %other, "tag payload is neither array nor string");
            Vec::new()
        }
    }
}

/// Decode a string-shaped tag payload. Stages are tried in order and the
/// first one that yields an array wins; exhaustion yields an empty list.
pub fn decode_tags_str(raw: &str) -> Vec<String> {
    if let Some(tags) = parse_direct(raw) {
        return tags;
    }
    if let Some(tags) = parse_nested(raw) {
        return tags;
    }
    if let Some(tags) = parse_repaired(raw) {
        return tags;
    }
    warn!(payload = raw, "unable to decode tag payload, degrading to empty");
    Vec::new()
}

/// Stage 1: the payload is JSON text of an array.
fn parse_direct(raw: &str) -> Option<Vec<String>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => Some(collect_labels(&items)),
        _ => None,
    }
}

/// Stage 2: the payload is JSON text of a *string* which itself is JSON
/// text of an array (the double-encoding bug). A nested parse that yields
/// anything other than an array counts as exhaustion of this stage.
fn parse_nested(raw: &str) -> Option<Vec<String>> {
    let Ok(Value::String(inner)) = serde_json::from_str::<Value>(raw) else {
        return None;
    };
    match serde_json::from_str::<Value>(&inner) {
        Ok(Value::Array(items)) => Some(collect_labels(&items)),
        _ => None,
    }
}

/// Stage 3: best-effort quote repair for hand-concatenated payloads, then
/// one more parse attempt.
fn parse_repaired(raw: &str) -> Option<Vec<String>> {
    let fixed = raw
        .replace("\\\"", "\"")
        .replace("''", "\"")
        .replace(" '", " \"")
        .replace("' ", "\" ");
    match serde_json::from_str::<Value>(&fixed) {
        Ok(Value::Array(items)) => Some(collect_labels(&items)),
        _ => None,
    }
}

fn collect_labels(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn native_array_passes_through() {
        let raw = json!(["cat", "dog"]);
        assert_eq!(decode_tags(&raw), vec!["cat", "dog"]);
    }

    #[test]
    fn single_encoded_round_trip() {
        let labels = vec!["golden retriever".to_string(), "dog".to_string()];
        let encoded = serde_json::to_string(&labels).unwrap();
        assert_eq!(decode_tags_str(&encoded), labels);
    }

    #[test]
    fn double_encoded_round_trip() {
        let labels = vec!["teddy".to_string(), "bear".to_string()];
        let once = serde_json::to_string(&labels).unwrap();
        let twice = serde_json::to_string(&once).unwrap();
        assert_eq!(decode_tags_str(&twice), labels);
    }

    #[test]
    fn garbage_decodes_to_empty() {
        assert!(decode_tags_str("not json at all {{{").is_empty());
    }

    #[test]
    fn nested_non_list_is_exhaustion_not_panic() {
        // JSON string whose inner parse yields a number.
        let raw = serde_json::to_string("42").unwrap();
        assert!(decode_tags_str(&raw).is_empty());
    }

    #[test]
    fn doubled_single_quotes_are_repaired() {
        let raw = "[''cat'', ''dog'']";
        assert_eq!(decode_tags_str(raw), vec!["cat", "dog"]);
    }

    #[test]
    fn stray_single_quotes_are_repaired() {
        // Single-quoted element as written by the old concatenation path.
        let raw = r#"["cat", 'dog' , "bird"]"#;
        assert_eq!(decode_tags_str(raw), vec!["cat", "dog", "bird"]);
    }

    #[test]
    fn non_string_elements_are_stringified() {
        let raw = json!(["cat", 7]);
        assert_eq!(decode_tags(&raw), vec!["cat".to_string(), "7".to_string()]);
    }

    #[test]
    fn null_payload_is_empty() {
        assert!(decode_tags(&Value::Null).is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let labels: Vec<String> = (0..10).map(|i| format!("label{i}")).collect();
        let encoded = serde_json::to_string(&labels).unwrap();
        assert_eq!(decode_tags_str(&encoded), labels);
    }
}
