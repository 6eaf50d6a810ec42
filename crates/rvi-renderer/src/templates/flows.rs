//! Cause-effect pairs.

use std::fmt::Write;

use rvi_blocks::{Block, fields};
use serde_json::Value;

use crate::escape::escape_html;
use crate::view::BlockView;

use super::{block_title, empty_state, finish};

const PAIR_KEYS: &[&str] = &["pairs", "links", "flows", "items"];
const CAUSE_KEYS: &[&str] = &["cause", "from", "source", "a"];
const EFFECT_KEYS: &[&str] = &["effect", "to", "target", "result", "b"];
const STRENGTH_KEYS: &[&str] = &["strength", "weight", "confidence"];

/// One normalized cause → effect link.
struct Link {
    cause: String,
    effect: String,
    strength: Option<String>,
}

/// Normalize a pair entry: an `"A -> B"` string shorthand, a 2–3
/// element tuple, or an object with aliased keys.
fn normalize_link(value: &Value) -> Option<Link> {
    match value {
        Value::String(s) => {
            let (cause, effect) = split_arrow(s)?;
            Some(Link {
                cause,
                effect,
                strength: None,
            })
        }
        Value::Array(_) => {
            let entry = fields::normalize_entry(value);
            Some(Link {
                cause: entry.text?,
                effect: entry.detail?,
                strength: entry.third,
            })
        }
        Value::Object(_) => {
            let entry = fields::normalize_entry(value);
            let cause = fields::text_field(&entry.map, CAUSE_KEYS);
            let effect = fields::text_field(&entry.map, EFFECT_KEYS);
            match (cause, effect) {
                (Some(cause), Some(effect)) => Some(Link {
                    cause,
                    effect,
                    strength: fields::text_field(&entry.map, STRENGTH_KEYS),
                }),
                // An object holding only the shorthand string.
                _ => entry.text.as_deref().and_then(split_arrow).map(|(cause, effect)| Link {
                    cause,
                    effect,
                    strength: fields::text_field(&entry.map, STRENGTH_KEYS),
                }),
            }
        }
        _ => None,
    }
}

/// Split the `"A -> B"` shorthand on its first arrow.
fn split_arrow(s: &str) -> Option<(String, String)> {
    let (cause, effect) = s.split_once("->").or_else(|| s.split_once('\u{2192}'))?;
    let cause = cause.trim();
    let effect = effect.trim();
    if cause.is_empty() || effect.is_empty() {
        return None;
    }
    Some((cause.to_owned(), effect.to_owned()))
}

/// Cause → effect pair list with optional strength tags.
pub(crate) fn cause_effect(block: &Block) -> BlockView {
    let links: Vec<Link> = fields::list_field(&block.payload, PAIR_KEYS)
        .unwrap_or_default()
        .iter()
        .filter_map(normalize_link)
        .collect();

    if links.is_empty() {
        return finish(
            block,
            block_title(block),
            &empty_state("No cause-effect links found."),
        );
    }

    let mut body = String::from(r#"<div class="rvi-cause-effect-list">"#);
    for link in &links {
        body.push_str(r#"<div class="rvi-pair">"#);
        let _ = write!(
            body,
            r#"<span class="rvi-cause">{}</span><span class="rvi-arrow">&#8594;</span><span class="rvi-effect">{}</span>"#,
            escape_html(&link.cause),
            escape_html(&link.effect)
        );
        if let Some(strength) = &link.strength {
            let _ = write!(body, r#"<span class="rvi-strength">{}</span>"#, escape_html(strength));
        }
        body.push_str("</div>");
    }
    body.push_str("</div>");
    finish(block, block_title(block), &body)
}

#[cfg(test)]
mod tests {
    use rvi_blocks::{TypeTag, sanitize};
    use serde_json::json;

    use super::*;

    fn block(payload: serde_json::Value) -> Block {
        Block::new(TypeTag::CauseEffect, sanitize::ensure_object(&payload))
    }

    #[test]
    fn test_arrow_shorthand() {
        let view = cause_effect(&block(json!({"pairs": ["cache miss -> slow response"]})));
        assert!(view.html.contains(r#"<span class="rvi-cause">cache miss</span>"#));
        assert!(view.html.contains(r#"<span class="rvi-effect">slow response</span>"#));
    }

    #[test]
    fn test_unicode_arrow_shorthand() {
        let view = cause_effect(&block(json!({"links": ["load → latency"]})));
        assert!(view.html.contains("load"));
        assert!(view.html.contains("latency"));
    }

    #[test]
    fn test_object_pair_with_strength() {
        let view = cause_effect(&block(
            json!({"pairs": [{"from": "retries", "to": "thundering herd", "strength": "strong"}]}),
        ));
        assert!(view.html.contains("retries"));
        assert!(view.html.contains("thundering herd"));
        assert!(view.html.contains(r#"<span class="rvi-strength">strong</span>"#));
    }

    #[test]
    fn test_tuple_pair() {
        let view = cause_effect(&block(json!({"flows": [["deploy", "restart", "weak"]]})));
        assert!(view.html.contains("deploy"));
        assert!(view.html.contains("restart"));
        assert!(view.html.contains("weak"));
    }

    #[test]
    fn test_unusable_entries_skipped() {
        let view = cause_effect(&block(json!({"pairs": ["no arrow here", {"cause": "only"}]})));
        assert!(view.html.contains("No cause-effect links found."));
    }

    #[test]
    fn test_empty_placeholder() {
        let view = cause_effect(&block(json!({})));
        assert!(view.html.contains("rvi-empty"));
    }
}
