//! Tag-block directive extraction.
//!
//! The second grammar: `[rviXxx attr="val" ...] body [/rviXxx]`. It runs
//! over text already cleaned by the JSON-block pass, so both grammars
//! can coexist in one message without interference.

use rvi_blocks::{Block, Payload, TypeTag, fields, sanitize};
use serde_json::Value;

use crate::lenient::parse_lenient;
use crate::span::{DirectiveMatch, collapse_blank_lines, remove_spans};

/// Parsed opening tag.
struct OpenTag {
    identifier: String,
    attrs: Payload,
    /// Byte offset one past the closing `]` of the opening tag.
    body_start: usize,
}

/// Extract tag-block directives from `text`.
///
/// Identifiers map through a fixed table to canonical types; well-formed
/// pairs with an unmapped `rvi*` identifier produce `fallback` blocks.
/// Matched spans are removed (blank runs collapsed) and this never
/// fails.
///
/// # Example
///
/// ```
/// use rvi_extract::extract_tag_directives;
/// use rvi_blocks::TypeTag;
///
/// let (cleaned, blocks) =
///     extract_tag_directives("See: [rvisteps]plan\nexecute[/rvisteps] done");
/// assert_eq!(cleaned, "See:  done");
/// assert_eq!(blocks[0].type_tag, TypeTag::Steps);
/// ```
#[must_use]
pub fn extract_tag_directives(text: &str) -> (String, Vec<Block>) {
    let matches = matches(text);
    let spans: Vec<(usize, usize)> = matches.iter().map(|m| (m.start, m.end)).collect();
    let cleaned = collapse_blank_lines(&remove_spans(text, &spans));
    let blocks: Vec<Block> = matches.into_iter().map(|m| m.block).collect();

    if !blocks.is_empty() {
        tracing::debug!(count = blocks.len(), "extracted tag-block directives");
    }
    (cleaned, blocks)
}

/// All tag-block matches in `text`, in document order.
pub(crate) fn matches(text: &str) -> Vec<DirectiveMatch> {
    let mut matches = Vec::new();
    let mut cursor = 0;

    while let Some(rel) = text[cursor..].find('[') {
        let open_start = cursor + rel;
        let Some(open) = parse_open_tag(text, open_start) else {
            cursor = open_start + 1;
            continue;
        };

        let close_pattern = format!("[/{}]", open.identifier);
        let Some(close_start) = find_ascii_ci(text, open.body_start, &close_pattern) else {
            tracing::debug!(identifier = %open.identifier, "unclosed tag directive ignored");
            cursor = open_start + 1;
            continue;
        };
        let end = close_start + close_pattern.len();

        let body = &text[open.body_start..close_start];
        let block = block_from_tag(&open.identifier, open.attrs, body);
        matches.push(DirectiveMatch {
            start: open_start,
            end,
            block,
        });
        cursor = end;
    }
    matches
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Parse an opening tag at `open_start` (which points at `[`).
fn parse_open_tag(text: &str, open_start: usize) -> Option<OpenTag> {
    let after_bracket = &text[open_start + 1..];
    let ident_len = after_bracket
        .char_indices()
        .find(|&(_, c)| !is_identifier_char(c))
        .map_or(after_bracket.len(), |(i, _)| i);

    let identifier = after_bracket[..ident_len].to_ascii_lowercase();
    // The fixed prefix plus at least one more character.
    if ident_len <= 3 || !identifier.starts_with("rvi") {
        return None;
    }

    let attrs_start = open_start + 1 + ident_len;
    let attrs_end = find_unquoted(text, attrs_start, ']')?;
    let attrs = parse_attrs(&text[attrs_start..attrs_end]);

    Some(OpenTag {
        identifier,
        attrs,
        body_start: attrs_end + 1,
    })
}

/// Find `needle` (ASCII) in `haystack` at or after `from`,
/// case-insensitively, returning the byte offset.
fn find_ascii_ci(haystack: &str, from: usize, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let pat = needle.as_bytes();
    if pat.is_empty() || from >= hay.len() {
        return None;
    }
    hay[from..]
        .windows(pat.len())
        .position(|window| window.eq_ignore_ascii_case(pat))
        .map(|rel| from + rel)
}

/// Find `target` at or after `from`, skipping quoted runs.
fn find_unquoted(text: &str, from: usize, target: char) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in text[from..].char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => {
                if c == target {
                    return Some(from + i);
                }
                if c == '"' || c == '\'' {
                    quote = Some(c);
                }
            }
        }
    }
    None
}

/// Parse `key="value"`, `key='value'`, `key=value` and bare-token
/// attributes into a flat sanitized map. Bare tokens become `true`.
fn parse_attrs(attrs: &str) -> Payload {
    let mut out = Payload::new();
    let mut remaining = attrs.trim();

    while !remaining.is_empty() {
        remaining = remaining.trim_start();
        let key_end = remaining
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(remaining.len());
        let key = sanitize::sanitize_text(&remaining[..key_end]);
        remaining = &remaining[key_end..];

        if let Some(after_eq) = remaining.strip_prefix('=') {
            let (value, rest) = parse_attr_value(after_eq);
            if !key.is_empty() {
                out.insert(key, Value::String(sanitize::sanitize_text(value)));
            }
            remaining = rest;
        } else if !key.is_empty() {
            out.insert(key, Value::Bool(true));
        } else if !remaining.is_empty() {
            // Unparseable leading character; skip it.
            let next = remaining.chars().next().map_or(1, char::len_utf8);
            remaining = &remaining[next..];
        }
    }
    out
}

/// Parse one attribute value, returning `(value, rest)`.
fn parse_attr_value(s: &str) -> (&str, &str) {
    if let Some(stripped) = s.strip_prefix('"') {
        match stripped.find('"') {
            Some(end) => (&stripped[..end], &stripped[end + 1..]),
            None => (stripped, ""),
        }
    } else if let Some(stripped) = s.strip_prefix('\'') {
        match stripped.find('\'') {
            Some(end) => (&stripped[..end], &stripped[end + 1..]),
            None => (stripped, ""),
        }
    } else {
        let end = s.find(char::is_whitespace).unwrap_or(s.len());
        (&s[..end], &s[end..])
    }
}

/// Fixed identifier table. Unmapped `rvi*` identifiers are fallback.
fn map_identifier(identifier: &str) -> TypeTag {
    match identifier {
        "rvikeypoints" | "rvikeypoint" | "rvikeycard" => TypeTag::Keypoints,
        "rvicomparison" | "rvicompare" => TypeTag::Comparison,
        "rvisteps" => TypeTag::Steps,
        "rvichecklist" => TypeTag::Checklist,
        "rvitimeline" => TypeTag::Timeline,
        "rvitradeoffs" | "rvitradeoff" => TypeTag::Tradeoffs,
        "rvicauseeffect" | "rvicause-effect" | "rvicause_effect" => TypeTag::CauseEffect,
        "rvimetric" | "rvimetrics" => TypeTag::Metrics,
        _ => TypeTag::Fallback,
    }
}

/// Build a block from an identifier, its attributes and its body.
fn block_from_tag(identifier: &str, mut attrs: Payload, body: &str) -> Block {
    let type_tag = map_identifier(identifier);
    if type_tag == TypeTag::Fallback {
        tracing::debug!(identifier, "unmapped tag identifier, rendering as fallback");
    }
    let version = attrs
        .remove("version")
        .as_ref()
        .and_then(fields::scalar_text)
        .unwrap_or_else(|| "1.0".to_owned());

    let mut payload = attrs;
    let trimmed = body.trim();

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        match parse_lenient(trimmed) {
            Ok(Value::Object(map)) => {
                // Structured body merges over the attributes.
                for (key, value) in map {
                    payload.insert(key, value);
                }
            }
            Ok(Value::Array(items)) => {
                payload.insert("items".to_owned(), Value::Array(items));
            }
            Ok(_) | Err(_) => apply_plain_body(type_tag, &mut payload, trimmed),
        }
    } else {
        apply_plain_body(type_tag, &mut payload, trimmed);
    }

    Block {
        type_tag,
        version,
        payload: sanitize::sanitize_object(&Value::Object(payload)),
    }
}

/// Interpret a plain-text body per block type.
fn apply_plain_body(type_tag: TypeTag, payload: &mut Payload, body: &str) {
    if body.is_empty() {
        return;
    }
    let list_key = match type_tag {
        TypeTag::Keypoints | TypeTag::Steps | TypeTag::Checklist => Some("items"),
        TypeTag::Timeline => Some("events"),
        _ => None,
    };
    match list_key {
        Some(key) => {
            let lines: Vec<Value> = body
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| Value::String(line.to_owned()))
                .collect();
            payload.insert(key.to_owned(), Value::Array(lines));
        }
        None => {
            payload.insert("text".to_owned(), Value::String(body.to_owned()));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_no_tags_text_unchanged() {
        let text = "Plain prose with [brackets] but no directives.";
        let (cleaned, blocks) = extract_tag_directives(text);
        assert_eq!(cleaned, text);
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_plain_body_lines_become_items() {
        let text = "[rvichecklist]\nwrite tests\nship it\n[/rvichecklist]";
        let (cleaned, blocks) = extract_tag_directives(text);
        assert_eq!(cleaned, "");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].type_tag, TypeTag::Checklist);
        assert_eq!(
            blocks[0].payload.get("items"),
            Some(&json!(["write tests", "ship it"]))
        );
    }

    #[test]
    fn test_timeline_lines_become_events() {
        let (_, blocks) = extract_tag_directives("[rvitimeline]2024 launch\n2025 scale[/rvitimeline]");
        assert_eq!(blocks[0].type_tag, TypeTag::Timeline);
        assert_eq!(
            blocks[0].payload.get("events"),
            Some(&json!(["2024 launch", "2025 scale"]))
        );
    }

    #[test]
    fn test_attributes() {
        let (_, blocks) = extract_tag_directives(
            r#"[rvimetrics title="Q3 numbers" unit='ms' compact]body[/rvimetrics]"#,
        );
        let payload = &blocks[0].payload;
        assert_eq!(payload.get("title"), Some(&json!("Q3 numbers")));
        assert_eq!(payload.get("unit"), Some(&json!("ms")));
        assert_eq!(payload.get("compact"), Some(&json!(true)));
        assert_eq!(payload.get("text"), Some(&json!("body")));
    }

    #[test]
    fn test_structured_body_merges_over_attributes() {
        let (_, blocks) = extract_tag_directives(
            r#"[rvisteps title="from attr"]{"title": "from body", "items": ["a"]}[/rvisteps]"#,
        );
        assert_eq!(blocks[0].payload.get("title"), Some(&json!("from body")));
        assert_eq!(blocks[0].payload.get("items"), Some(&json!(["a"])));
    }

    #[test]
    fn test_array_body() {
        let (_, blocks) = extract_tag_directives("[rvikeypoints][\"a\", \"b\"][/rvikeypoints]");
        assert_eq!(blocks[0].payload.get("items"), Some(&json!(["a", "b"])));
    }

    #[test]
    fn test_identifier_aliases() {
        let cases = [
            ("rvikeycard", TypeTag::Keypoints),
            ("rvicompare", TypeTag::Comparison),
            ("rvitradeoff", TypeTag::Tradeoffs),
            ("rvicause-effect", TypeTag::CauseEffect),
            ("rvicause_effect", TypeTag::CauseEffect),
            ("rvimetric", TypeTag::Metrics),
        ];
        for (identifier, expected) in cases {
            let text = format!("[{identifier}]x[/{identifier}]");
            let (_, blocks) = extract_tag_directives(&text);
            assert_eq!(blocks[0].type_tag, expected, "identifier {identifier}");
        }
    }

    #[test]
    fn test_unmapped_identifier_is_fallback() {
        let (cleaned, blocks) = extract_tag_directives("[rvigauge]75%[/rvigauge]");
        assert_eq!(cleaned, "");
        assert_eq!(blocks[0].type_tag, TypeTag::Fallback);
        assert_eq!(blocks[0].payload.get("text"), Some(&json!("75%")));
    }

    #[test]
    fn test_non_rvi_brackets_ignored() {
        let text = "[note]not ours[/note] [rd]also not[/rd]";
        let (cleaned, blocks) = extract_tag_directives(text);
        assert_eq!(cleaned, text);
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_unclosed_tag_left_alone() {
        let text = "[rvisteps]never closed";
        let (cleaned, blocks) = extract_tag_directives(text);
        assert_eq!(cleaned, text);
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_case_insensitive_identifier_and_close() {
        let (_, blocks) = extract_tag_directives("[RviSteps]a[/RVISTEPS]");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].type_tag, TypeTag::Steps);
    }

    #[test]
    fn test_version_attribute() {
        let (_, blocks) = extract_tag_directives(r#"[rvisteps version="2.0"]a[/rvisteps]"#);
        assert_eq!(blocks[0].version, "2.0");
        assert!(!blocks[0].payload.contains_key("version"));
    }

    #[test]
    fn test_two_tags_in_document_order() {
        let text = "[rvisteps]a[/rvisteps] mid [rvimetrics]{\"metrics\": []}[/rvimetrics]";
        let (cleaned, blocks) = extract_tag_directives(text);
        assert_eq!(cleaned, "mid");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].type_tag, TypeTag::Steps);
        assert_eq!(blocks[1].type_tag, TypeTag::Metrics);
    }

    #[test]
    fn test_bracket_in_attribute_value() {
        let (_, blocks) =
            extract_tag_directives(r#"[rvikeypoints title="a ] b"]x[/rvikeypoints]"#);
        assert_eq!(blocks[0].payload.get("title"), Some(&json!("a ] b")));
    }
}
