// Ordered field extraction for loosely specified backend responses

use serde_json::Value;

/// Returns the first field in `candidates` that holds a non-empty string.
///
/// Candidates are tried in order, so earlier names take priority when a
/// response carries more than one alias. Non-string and empty values are
/// skipped rather than treated as a match.
pub fn first_text_field<'a>(value: &'a Value, candidates: &[&str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|field| value.get(field).and_then(Value::as_str))
        .find(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELDS: &[&str] = &["output", "translation", "result"];

    #[test]
    fn test_priority_order() {
        let value = json!({"result": "c", "translation": "b", "output": "a"});
        assert_eq!(first_text_field(&value, FIELDS), Some("a"));

        let value = json!({"result": "c", "translation": "b"});
        assert_eq!(first_text_field(&value, FIELDS), Some("b"));
    }

    #[test]
    fn test_skips_empty_and_non_string_values() {
        let value = json!({"output": "", "translation": 42, "result": "ok"});
        assert_eq!(first_text_field(&value, FIELDS), Some("ok"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(first_text_field(&json!({}), FIELDS), None);
        assert_eq!(first_text_field(&json!("plain"), FIELDS), None);
        assert_eq!(first_text_field(&Value::Null, FIELDS), None);
    }
}
