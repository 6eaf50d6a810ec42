//! Opaque fallback rendering.

use std::fmt::Write;

use rvi_blocks::{Block, fields};

use crate::escape::escape_html;
use crate::view::BlockView;

use super::{block_title, empty_state, finish};

/// Render unclassifiable content as preformatted text.
///
/// Shows the raw directive text when present, otherwise the payload
/// itself pretty-printed; an entirely empty payload still yields a
/// visible placeholder.
pub(crate) fn fallback(block: &Block) -> BlockView {
    let raw = fields::text_field(&block.payload, &["raw", "text", "content", "message"])
        .or_else(|| {
            if block.payload.is_empty() {
                None
            } else {
                serde_json::to_string_pretty(&block.payload).ok()
            }
        });

    let body = match raw {
        Some(raw) => {
            let mut out = String::with_capacity(raw.len() + 48);
            let _ = write!(out, r#"<pre class="rvi-fallback-raw">{}</pre>"#, escape_html(&raw));
            out
        }
        None => empty_state("No displayable content."),
    };
    finish(block, block_title(block), &body)
}

#[cfg(test)]
mod tests {
    use rvi_blocks::{Payload, TypeTag, sanitize};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_raw_text_preformatted() {
        let block = Block::fallback_raw("{broken json");
        let view = fallback(&block);
        assert!(view.html.contains(r#"<pre class="rvi-fallback-raw">{broken json</pre>"#));
    }

    #[test]
    fn test_payload_pretty_printed() {
        let block = Block::new(
            TypeTag::Fallback,
            sanitize::ensure_object(&json!({"mystery": {"depth": 2}})),
        );
        let view = fallback(&block);
        assert!(view.html.contains("mystery"));
        assert!(view.html.contains("&quot;depth&quot;: 2"));
    }

    #[test]
    fn test_empty_payload_placeholder() {
        let view = fallback(&Block::new(TypeTag::Fallback, Payload::new()));
        assert!(view.html.contains("No displayable content."));
    }

    #[test]
    fn test_raw_text_is_escaped() {
        let block = Block::fallback_raw("<img onerror=x>");
        let view = fallback(&block);
        assert!(!view.html.contains("<img"));
        assert!(view.html.contains("&lt;img"));
    }
}
