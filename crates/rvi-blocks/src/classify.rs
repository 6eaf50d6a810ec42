//! Heuristic block classification.
//!
//! Applied only when a directive carries no explicit type (or the
//! explicit type folded to fallback): the payload's key shape picks the
//! canonical type on a best-effort basis.

use serde_json::Value;

use crate::TypeTag;
use crate::block::Payload;
use crate::sanitize;

const OPTION_KEYS: &[&str] = &["options", "alternatives", "choices"];
const CHECK_STATE_KEYS: &[&str] = &["checked", "done", "complete"];

fn has_any(payload: &Payload, keys: &[&str]) -> bool {
    keys.iter().any(|key| payload.contains_key(*key))
}

/// True when any entry of the named list carries one of `entry_keys`.
fn any_entry_has(payload: &Payload, list_keys: &[&str], entry_keys: &[&str]) -> bool {
    list_keys.iter().any(|list_key| {
        payload.get(*list_key).is_some_and(|value| {
            sanitize::ensure_array(value).iter().any(|entry| match entry {
                Value::Object(map) => entry_keys.iter().any(|key| map.contains_key(*key)),
                _ => false,
            })
        })
    })
}

/// Infer a canonical type from the shape of a sanitized payload.
///
/// Checks run in a fixed order; the tradeoffs shape test runs before
/// the plain option-key test so that options carrying `gains`/`costs`
/// classify as tradeoffs rather than comparison.
///
/// # Example
///
/// ```
/// use rvi_blocks::{classify, sanitize, TypeTag};
///
/// let payload = sanitize::ensure_object(&serde_json::json!({"options": ["a", "b"]}));
/// assert_eq!(classify::infer_type(&payload), TypeTag::Comparison);
/// ```
#[must_use]
pub fn infer_type(payload: &Payload) -> TypeTag {
    if has_any(payload, &["tradeoffs"])
        || any_entry_has(payload, OPTION_KEYS, &["gains", "costs"])
    {
        return TypeTag::Tradeoffs;
    }
    if has_any(payload, OPTION_KEYS) || has_any(payload, &["attributes"]) {
        return TypeTag::Comparison;
    }
    if has_any(payload, &["steps", "sequence", "flow"]) {
        return TypeTag::Steps;
    }
    if has_any(payload, &["checklist"])
        || any_entry_has(payload, &["items"], CHECK_STATE_KEYS)
    {
        return TypeTag::Checklist;
    }
    if has_any(payload, &["events", "timeline", "milestones"]) {
        return TypeTag::Timeline;
    }
    if has_any(payload, &["pairs", "links", "flows"]) {
        return TypeTag::CauseEffect;
    }
    if has_any(payload, &["metrics", "kpis", "values"]) {
        return TypeTag::Metrics;
    }
    if has_any(
        payload,
        &["items", "points", "keypoints", "list", "bullets", "entries", "highlights"],
    ) {
        return TypeTag::Keypoints;
    }
    TypeTag::Fallback
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload(value: serde_json::Value) -> Payload {
        sanitize::ensure_object(&value)
    }

    #[test]
    fn test_options_imply_comparison() {
        assert_eq!(
            infer_type(&payload(json!({"options": [{"name": "A"}]}))),
            TypeTag::Comparison
        );
        assert_eq!(
            infer_type(&payload(json!({"attributes": {"speed": "fast"}}))),
            TypeTag::Comparison
        );
    }

    #[test]
    fn test_gain_cost_options_imply_tradeoffs() {
        assert_eq!(
            infer_type(&payload(json!({"options": [{"name": "A", "gains": ["x"]}]}))),
            TypeTag::Tradeoffs
        );
        assert_eq!(
            infer_type(&payload(json!({"tradeoffs": []}))),
            TypeTag::Tradeoffs
        );
    }

    #[test]
    fn test_steps_family() {
        assert_eq!(infer_type(&payload(json!({"steps": ["a"]}))), TypeTag::Steps);
        assert_eq!(infer_type(&payload(json!({"sequence": ["a"]}))), TypeTag::Steps);
        assert_eq!(infer_type(&payload(json!({"flow": ["a"]}))), TypeTag::Steps);
    }

    #[test]
    fn test_checked_items_imply_checklist() {
        assert_eq!(
            infer_type(&payload(json!({"items": [{"text": "a", "done": true}]}))),
            TypeTag::Checklist
        );
        assert_eq!(
            infer_type(&payload(json!({"checklist": ["a"]}))),
            TypeTag::Checklist
        );
    }

    #[test]
    fn test_plain_items_imply_keypoints() {
        assert_eq!(infer_type(&payload(json!({"items": ["a", "b"]}))), TypeTag::Keypoints);
        assert_eq!(infer_type(&payload(json!({"bullets": ["a"]}))), TypeTag::Keypoints);
        assert_eq!(infer_type(&payload(json!({"highlights": "x|y"}))), TypeTag::Keypoints);
    }

    #[test]
    fn test_timeline_cause_effect_metrics() {
        assert_eq!(infer_type(&payload(json!({"events": []}))), TypeTag::Timeline);
        assert_eq!(infer_type(&payload(json!({"milestones": []}))), TypeTag::Timeline);
        assert_eq!(infer_type(&payload(json!({"pairs": []}))), TypeTag::CauseEffect);
        assert_eq!(infer_type(&payload(json!({"flows": []}))), TypeTag::CauseEffect);
        assert_eq!(infer_type(&payload(json!({"kpis": []}))), TypeTag::Metrics);
    }

    #[test]
    fn test_unrecognized_shape_is_fallback() {
        assert_eq!(infer_type(&payload(json!({}))), TypeTag::Fallback);
        assert_eq!(infer_type(&payload(json!({"prose": "hello"}))), TypeTag::Fallback);
    }
}
