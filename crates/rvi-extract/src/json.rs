//! JSON-block directive extraction.
//!
//! Finds sentinel-delimited and fence-delimited structured payloads,
//! parses them leniently, classifies each into a canonical type, and
//! strips the matched spans from the display text.

use rvi_blocks::{Block, Payload, TypeTag, classify, fields, sanitize};
use serde_json::Value;

use crate::fence::scan_fenced_regions;
use crate::lenient::parse_lenient;
use crate::span::{DirectiveMatch, collapse_blank_lines, remove_spans};

/// Opening sentinel of an inline JSON directive.
const OPEN_SENTINEL: &str = "\u{3010}RVI-JSON\u{3011}";
/// Closing sentinel of an inline JSON directive.
const CLOSE_SENTINEL: &str = "\u{3010}/RVI-JSON\u{3011}";

/// Fence info strings recognized as JSON directives (case-insensitive).
const FENCE_ALIASES: &[&str] = &["rvi-json", "rvijson", "json", "jsonc", "json5"];

/// Extract JSON-block directives from `text`.
///
/// Returns the text with every matched span removed (blank runs
/// collapsed, ends trimmed) and the parsed blocks in document order.
/// This never fails: an unparseable body yields a single `fallback`
/// block carrying the sanitized raw text.
///
/// # Example
///
/// ```
/// use rvi_extract::extract_json_directives;
/// use rvi_blocks::TypeTag;
///
/// let text = "Intro.\n【RVI-JSON】{\"type\":\"steps\",\"payload\":{\"items\":[\"a\"]}}【/RVI-JSON】\nOutro.";
/// let (cleaned, blocks) = extract_json_directives(text);
/// assert_eq!(cleaned, "Intro.\n\nOutro.");
/// assert_eq!(blocks[0].type_tag, TypeTag::Steps);
/// ```
#[must_use]
pub fn extract_json_directives(text: &str) -> (String, Vec<Block>) {
    let matches = matches(text);
    let spans: Vec<(usize, usize)> = matches.iter().map(|m| (m.start, m.end)).collect();
    let cleaned = collapse_blank_lines(&remove_spans(text, &spans));
    let blocks: Vec<Block> = matches.into_iter().map(|m| m.block).collect();

    if !blocks.is_empty() {
        tracing::debug!(count = blocks.len(), "extracted JSON-block directives");
    }
    (cleaned, blocks)
}

/// All JSON-block matches in `text`, sorted by position.
///
/// A fence nested inside a sentinel pair would match twice; later
/// matches overlapping an earlier one are dropped so the block list
/// stays consistent with the spans actually removed.
pub(crate) fn matches(text: &str) -> Vec<DirectiveMatch> {
    let mut matches = scan_sentinels(text);
    matches.extend(scan_fences(text));
    matches.sort_by_key(|m| m.start);

    let mut kept: Vec<DirectiveMatch> = Vec::with_capacity(matches.len());
    let mut last_end = 0;
    for m in matches {
        if m.start >= last_end {
            last_end = m.end;
            kept.push(m);
        }
    }
    kept
}

/// Scan for sentinel pairs. Non-nested; an opening sentinel without a
/// closing one is left in the text.
fn scan_sentinels(text: &str) -> Vec<DirectiveMatch> {
    let mut matches = Vec::new();
    let mut cursor = 0;

    while let Some(open_rel) = text[cursor..].find(OPEN_SENTINEL) {
        let open = cursor + open_rel;
        let body_start = open + OPEN_SENTINEL.len();
        let Some(close_rel) = text[body_start..].find(CLOSE_SENTINEL) else {
            break;
        };
        let close = body_start + close_rel;
        let end = close + CLOSE_SENTINEL.len();

        matches.push(DirectiveMatch {
            start: open,
            end,
            block: block_from_body(&text[body_start..close]),
        });
        cursor = end;
    }
    matches
}

/// Scan for fenced regions whose info string is a recognized alias.
fn scan_fences(text: &str) -> Vec<DirectiveMatch> {
    scan_fenced_regions(text)
        .into_iter()
        .filter(|region| {
            FENCE_ALIASES
                .iter()
                .any(|alias| region.info.eq_ignore_ascii_case(alias))
        })
        .map(|region| DirectiveMatch {
            start: region.start,
            end: region.end,
            block: block_from_body(&region.body),
        })
        .collect()
}

/// Parse one directive body into a block. Total: parse failures degrade
/// to a fallback block wrapping the raw text.
fn block_from_body(body: &str) -> Block {
    match parse_lenient(body) {
        Ok(value) => block_from_value(&value),
        Err(err) => {
            tracing::debug!(error = %err, "directive body unparseable, degrading to fallback");
            Block::fallback_raw(body)
        }
    }
}

/// Shape a parsed value into a classified block.
fn block_from_value(value: &Value) -> Block {
    match value {
        Value::Object(root) => {
            let explicit = root.get("type").and_then(fields::scalar_text);
            let version = root
                .get("version")
                .and_then(fields::scalar_text)
                .unwrap_or_else(|| "1.0".to_owned());

            let payload = payload_from_root(root);
            let type_tag = match explicit.as_deref().map(TypeTag::parse) {
                Some(tag) if tag != TypeTag::Fallback => tag,
                // Absent or defaulted type: classify from shape.
                _ => classify::infer_type(&payload),
            };

            Block {
                type_tag,
                version,
                payload,
            }
        }
        Value::Array(items) => {
            let mut payload = Payload::new();
            payload.insert("items".to_owned(), Value::Array(sanitize::sanitize_array(items)));
            let type_tag = classify::infer_type(&payload);
            Block::new(type_tag, payload)
        }
        other => Block::fallback_raw(&other.to_string()),
    }
}

/// Pick the payload out of an object root: a nested `payload` object
/// wins; otherwise the remaining root keys (minus `type`/`version`).
fn payload_from_root(root: &serde_json::Map<String, Value>) -> Payload {
    if let Some(nested @ Value::Object(_)) = root.get("payload") {
        return sanitize::sanitize_object(nested);
    }
    let remaining: serde_json::Map<String, Value> = root
        .iter()
        .filter(|(key, _)| key.as_str() != "type" && key.as_str() != "version")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    sanitize::sanitize_object(&Value::Object(remaining))
}
