//! Recursive, type-coercing cleaning of untrusted payload values.
//!
//! Directive payloads come straight out of model-generated text and are
//! treated as hostile: strings may carry control characters, objects may
//! be littered with `null` and empty-string leaves, and numbers may
//! arrive as strings. These helpers normalize all of that without ever
//! failing.
//!
//! Falsy-but-meaningful scalars survive: numeric `0` and boolean
//! `false` are kept (a checklist item with `checked: false` and a
//! metric with `value: 0` are both valid data). Only `null` and
//! empty/whitespace-only strings are dropped from object form.

use serde_json::Value;

use crate::block::Payload;

/// Maximum recursion depth for nested payloads. Anything deeper is
/// discarded rather than followed.
const MAX_DEPTH: usize = 16;

/// Strip control characters and trim surrounding whitespace.
///
/// Keeps `\n` and `\t` (multi-line bodies are legitimate); removes the
/// remaining C0 range plus DEL and the C1 range.
#[must_use]
pub fn sanitize_text(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .filter(|&c| c == '\n' || c == '\t' || !c.is_control())
        .collect();
    cleaned.trim().to_owned()
}

/// Coerce a value to a finite number, or return `fallback`.
///
/// Accepts native numbers and numeric strings (trimmed). Non-finite
/// results and everything else yield the fallback.
#[must_use]
pub fn sanitize_number(value: &Value, fallback: f64) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => n,
        _ => fallback,
    }
}

/// Interpret common truthy/falsy encodings.
///
/// Understands native booleans, `on`/`off`, `yes`/`no`, `true`/`false`
/// (case-insensitive) and numeric `1`/`0`. Returns `None` for anything
/// unrecognized.
#[must_use]
pub fn sanitize_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" | "checked" | "done" => Some(true),
            "off" | "no" | "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Sanitize an arbitrary value, returning `None` when nothing usable
/// remains (`null`, empty string, or depth exceeded).
#[must_use]
pub fn sanitize_value(value: &Value) -> Option<Value> {
    sanitize_value_at(value, 0)
}

fn sanitize_value_at(value: &Value, depth: usize) -> Option<Value> {
    if depth > MAX_DEPTH {
        return None;
    }
    match value {
        Value::Null => None,
        Value::String(s) => {
            let cleaned = sanitize_text(s);
            if cleaned.is_empty() { None } else { Some(Value::String(cleaned)) }
        }
        Value::Bool(_) | Value::Number(_) => Some(value.clone()),
        Value::Array(items) => Some(Value::Array(sanitize_array_at(items, depth))),
        Value::Object(_) => Some(Value::Object(sanitize_object_at(value, depth))),
    }
}

/// Sanitize every element of an array, dropping unusable entries.
#[must_use]
pub fn sanitize_array(items: &[Value]) -> Vec<Value> {
    sanitize_array_at(items, 0)
}

fn sanitize_array_at(items: &[Value], depth: usize) -> Vec<Value> {
    if depth > MAX_DEPTH {
        return Vec::new();
    }
    items
        .iter()
        .filter_map(|item| sanitize_value_at(item, depth + 1))
        .collect()
}

/// Sanitize an object, dropping keys whose value cleans to nothing.
///
/// Non-object input yields an empty map.
#[must_use]
pub fn sanitize_object(value: &Value) -> Payload {
    sanitize_object_at(value, 0)
}

fn sanitize_object_at(value: &Value, depth: usize) -> Payload {
    let mut out = Payload::new();
    if depth > MAX_DEPTH {
        return out;
    }
    if let Value::Object(map) = value {
        for (key, val) in map {
            let key = sanitize_text(key);
            if key.is_empty() {
                continue;
            }
            if let Some(cleaned) = sanitize_value_at(val, depth + 1) {
                out.insert(key, cleaned);
            }
        }
    }
    out
}

/// Coerce a value into a list.
///
/// Arrays pass through sanitized. Strings split on newlines first, then
/// on pipes, dropping blank segments. Any other scalar is wrapped as a
/// single-element list; `null` yields an empty list.
#[must_use]
pub fn ensure_array(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => sanitize_array(items),
        Value::String(s) => {
            let cleaned = sanitize_text(s);
            let delimiter = if cleaned.contains('\n') { '\n' } else { '|' };
            cleaned
                .split(delimiter)
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| Value::String(part.to_owned()))
                .collect()
        }
        Value::Null => Vec::new(),
        other => sanitize_value(other).map_or_else(Vec::new, |v| vec![v]),
    }
}

/// Coerce a value into a map; non-object input yields an empty map.
#[must_use]
pub fn ensure_object(value: &Value) -> Payload {
    match value {
        Value::Object(_) => sanitize_object(value),
        _ => Payload::new(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_sanitize_text_strips_controls() {
        assert_eq!(sanitize_text("  a\u{0000}b\u{009f}c  "), "abc");
        assert_eq!(sanitize_text("line1\nline2"), "line1\nline2");
        assert_eq!(sanitize_text("\u{0007}"), "");
    }

    #[test]
    fn test_sanitize_number() {
        assert_eq!(sanitize_number(&json!(3.5), 0.0), 3.5);
        assert_eq!(sanitize_number(&json!(" 42 "), 0.0), 42.0);
        assert_eq!(sanitize_number(&json!("NaN"), 7.0), 7.0);
        assert_eq!(sanitize_number(&json!([1]), 7.0), 7.0);
        assert_eq!(sanitize_number(&Value::Null, -1.0), -1.0);
    }

    #[test]
    fn test_sanitize_boolean() {
        assert_eq!(sanitize_boolean(&json!("off")), Some(false));
        assert_eq!(sanitize_boolean(&json!("YES")), Some(true));
        assert_eq!(sanitize_boolean(&json!(1)), Some(true));
        assert_eq!(sanitize_boolean(&json!(0)), Some(false));
        assert_eq!(sanitize_boolean(&json!(true)), Some(true));
        assert_eq!(sanitize_boolean(&json!("maybe")), None);
        assert_eq!(sanitize_boolean(&json!(2)), None);
    }

    #[test]
    fn test_sanitize_object_drops_empty_leaves() {
        let cleaned = sanitize_object(&json!({"a": "", "b": null, "c": "x"}));
        assert_eq!(Value::Object(cleaned), json!({"c": "x"}));
    }

    #[test]
    fn test_falsy_but_meaningful_values_survive() {
        let cleaned = sanitize_object(&json!({"checked": false, "value": 0}));
        assert_eq!(Value::Object(cleaned), json!({"checked": false, "value": 0}));
    }

    #[test]
    fn test_sanitize_object_recurses() {
        let cleaned = sanitize_object(&json!({
            "items": ["  a  ", "", null, {"title": "t", "note": ""}],
            "nested": {"empty": ""}
        }));
        assert_eq!(
            Value::Object(cleaned),
            json!({"items": ["a", {"title": "t"}], "nested": {}})
        );
    }

    #[test]
    fn test_sanitize_object_non_object_input() {
        assert!(sanitize_object(&json!("scalar")).is_empty());
        assert!(sanitize_object(&json!([1, 2])).is_empty());
    }

    #[test]
    fn test_depth_bound() {
        let mut value = json!("leaf");
        for _ in 0..40 {
            value = json!({ "inner": value });
        }
        // Deeply nested content is discarded, not followed forever.
        let cleaned = sanitize_object(&value);
        assert!(cleaned.len() <= 1);
    }

    #[test]
    fn test_ensure_array_newline_first() {
        assert_eq!(
            ensure_array(&json!("a\nb|c")),
            vec![json!("a"), json!("b|c")]
        );
        assert_eq!(ensure_array(&json!("a|b")), vec![json!("a"), json!("b")]);
        assert_eq!(ensure_array(&json!(["x", ""])), vec![json!("x")]);
        assert_eq!(ensure_array(&json!(5)), vec![json!(5)]);
        assert_eq!(ensure_array(&Value::Null), Vec::<Value>::new());
    }

    #[test]
    fn test_ensure_object() {
        let map = ensure_object(&json!({"k": "v"}));
        assert_eq!(Value::Object(map), json!({"k": "v"}));
        assert!(ensure_object(&json!("not a map")).is_empty());
    }
}
