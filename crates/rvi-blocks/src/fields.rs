//! Alias-tolerant payload field access.
//!
//! Directive authors name the same concept many ways: a title can
//! arrive as `title`, `label`, `name`, `key` or `text`, and an item can
//! be a bare string, a 2–3 element tuple, or a structured object. Each
//! helper here is a pure coercion tried against an ordered candidate
//! list, returning the first present, non-empty value.

use serde_json::Value;

use crate::block::Payload;
use crate::sanitize;

/// Candidate keys for an entry's primary text.
pub const TITLE_KEYS: &[&str] = &["title", "label", "name", "key", "text"];

/// Candidate keys for an entry's secondary text.
pub const DETAIL_KEYS: &[&str] = &["detail", "description", "summary", "value", "content", "note"];

/// Coerce a scalar value to display text.
///
/// Strings are sanitized; numbers and booleans are formatted. Containers
/// and `null` yield `None`.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => sanitize::sanitize_text(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() { None } else { Some(text) }
}

/// First candidate key whose value coerces to non-empty text.
#[must_use]
pub fn text_field(map: &Payload, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| map.get(*key).and_then(scalar_text))
}

/// First candidate key holding a non-empty list (via
/// [`sanitize::ensure_array`] coercion).
#[must_use]
pub fn list_field(map: &Payload, keys: &[&str]) -> Option<Vec<Value>> {
    keys.iter().find_map(|key| {
        let items = sanitize::ensure_array(map.get(*key)?);
        if items.is_empty() { None } else { Some(items) }
    })
}

/// First candidate key holding a non-empty object.
#[must_use]
pub fn map_field(map: &Payload, keys: &[&str]) -> Option<Payload> {
    keys.iter().find_map(|key| {
        let inner = sanitize::ensure_object(map.get(*key)?);
        if inner.is_empty() { None } else { Some(inner) }
    })
}

/// First candidate key coercing to a finite number.
#[must_use]
pub fn number_field(map: &Payload, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| {
        let value = map.get(*key)?;
        let number = sanitize::sanitize_number(value, f64::NAN);
        if number.is_nan() { None } else { Some(number) }
    })
}

/// First candidate key with a recognizable boolean encoding.
#[must_use]
pub fn bool_field(map: &Payload, keys: &[&str]) -> Option<bool> {
    keys.iter().find_map(|key| sanitize::sanitize_boolean(map.get(*key)?))
}

/// An item entry normalized from its directive form.
///
/// Entries may arrive as a bare string, a 2–3 element tuple, or a
/// structured object; renderers read `text`/`detail`/`third` for the
/// positional forms and `map` for everything type-specific.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Entry {
    /// Primary text (tuple position 0, or the title-family key).
    pub text: Option<String>,
    /// Secondary text (tuple position 1, or the detail-family key).
    pub detail: Option<String>,
    /// Third tuple position, interpreted per block type.
    pub third: Option<String>,
    /// Full sanitized map for object-form entries.
    pub map: Payload,
}

impl Entry {
    /// True when the entry carries nothing renderable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.detail.is_none() && self.map.is_empty()
    }
}

/// Normalize one item entry from any of its accepted shapes.
#[must_use]
pub fn normalize_entry(value: &Value) -> Entry {
    match value {
        Value::Array(items) => {
            let mut texts = items.iter().filter_map(scalar_text);
            Entry {
                text: texts.next(),
                detail: texts.next(),
                third: texts.next(),
                map: Payload::new(),
            }
        }
        Value::Object(_) => {
            let map = sanitize::sanitize_object(value);
            Entry {
                text: text_field(&map, TITLE_KEYS),
                detail: text_field(&map, DETAIL_KEYS),
                third: None,
                map,
            }
        }
        other => Entry {
            text: scalar_text(other),
            ..Entry::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn payload(value: serde_json::Value) -> Payload {
        sanitize::ensure_object(&value)
    }

    #[test]
    fn test_text_field_ordered_candidates() {
        let map = payload(json!({"label": "second", "title": "first"}));
        assert_eq!(text_field(&map, TITLE_KEYS), Some("first".to_owned()));

        let map = payload(json!({"name": "third"}));
        assert_eq!(text_field(&map, TITLE_KEYS), Some("third".to_owned()));
    }

    #[test]
    fn test_text_field_skips_empty() {
        let map = payload(json!({"title": "   ", "label": "used"}));
        // Sanitization already dropped the blank title key.
        assert_eq!(text_field(&map, TITLE_KEYS), Some("used".to_owned()));
    }

    #[test]
    fn test_text_field_formats_scalars() {
        let map = payload(json!({"value": 12}));
        assert_eq!(text_field(&map, DETAIL_KEYS), Some("12".to_owned()));
    }

    #[test]
    fn test_list_field() {
        let map = payload(json!({"items": "a|b", "steps": []}));
        assert_eq!(
            list_field(&map, &["steps", "items"]),
            Some(vec![json!("a"), json!("b")])
        );
        assert_eq!(list_field(&map, &["missing"]), None);
    }

    #[test]
    fn test_number_and_bool_fields() {
        let map = payload(json!({"value": "3.5", "done": "yes"}));
        assert_eq!(number_field(&map, &["value"]), Some(3.5));
        assert_eq!(bool_field(&map, &["done"]), Some(true));
        assert_eq!(bool_field(&map, &["value"]), None);
    }

    #[test]
    fn test_normalize_entry_bare_string() {
        let entry = normalize_entry(&json!("  point  "));
        assert_eq!(entry.text, Some("point".to_owned()));
        assert_eq!(entry.detail, None);
        assert!(!entry.is_empty());
    }

    #[test]
    fn test_normalize_entry_tuple() {
        let entry = normalize_entry(&json!(["Latency", "p99 under 20ms", "+5%"]));
        assert_eq!(entry.text, Some("Latency".to_owned()));
        assert_eq!(entry.detail, Some("p99 under 20ms".to_owned()));
        assert_eq!(entry.third, Some("+5%".to_owned()));
    }

    #[test]
    fn test_normalize_entry_object_aliases() {
        let entry = normalize_entry(&json!({"name": "Step", "summary": "Do it"}));
        assert_eq!(entry.text, Some("Step".to_owned()));
        assert_eq!(entry.detail, Some("Do it".to_owned()));
        assert_eq!(entry.map.get("name"), Some(&json!("Step")));
    }

    #[test]
    fn test_normalize_entry_unusable() {
        assert!(normalize_entry(&json!(null)).is_empty());
        assert!(normalize_entry(&json!({})).is_empty());
    }
}
