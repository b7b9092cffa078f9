//! Shape-agnostic accessors over the parsed export tree.
//!
//! Depending on how an element was encoded, a field may be a string, an
//! object carrying its text under `_`, or an array of either. Callers only
//! ever ask for "one value" or "all values".

use serde_json::Value;

/// Key holding the text of an element that also has attributes or children.
const TEXT_KEY: &str = "_";

/// Returns the single text value of `key`: the first element of an array,
/// the value itself otherwise, or `""` when `obj` or `key` is absent.
pub fn scalar(obj: Option<&Value>, key: &str) -> String {
    let Some(value) = obj.and_then(|o| o.get(key)) else {
        return String::new();
    };
    match value {
        Value::Array(items) => items.first().map(text_of).unwrap_or_default(),
        other => text_of(other),
    }
}

/// Returns all values of `key`: the array itself, a one-element sequence for
/// a scalar, or an empty sequence when `obj` or `key` is absent.
pub fn sequence<'a>(obj: Option<&'a Value>, key: &str) -> Vec<&'a Value> {
    match obj.and_then(|o| o.get(key)) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(other) => vec![other],
    }
}

/// Text of a single value: strings as-is, objects through their `_` key,
/// numbers and booleans rendered, everything else empty.
pub fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => map.get(TEXT_KEY).map(text_of).unwrap_or_default(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_takes_first_of_array() {
        let item = json!({ "title": ["First", "Second"] });
        assert_eq!(scalar(Some(&item), "title"), "First");
    }

    #[test]
    fn scalar_reads_text_key_of_object() {
        let item = json!({ "category": { "domain": "category", "_": "News" } });
        assert_eq!(scalar(Some(&item), "category"), "News");
    }

    #[test]
    fn absent_values_are_empty() {
        let item = json!({ "title": null });
        assert_eq!(scalar(Some(&item), "title"), "");
        assert_eq!(scalar(Some(&item), "missing"), "");
        assert_eq!(scalar(None, "title"), "");
        assert!(sequence(Some(&item), "title").is_empty());
        assert!(sequence(None, "category").is_empty());
    }

    #[test]
    fn sequence_wraps_scalar() {
        let item = json!({ "category": "News" });
        assert_eq!(sequence(Some(&item), "category"), vec![&json!("News")]);
    }
}
