//! Composition of both grammars over one message.
//!
//! The JSON-block grammar runs first; the tag-block grammar runs over
//! the already-cleaned result, so a bracket tag inside a JSON payload
//! can never match. Block order follows document order across both
//! grammars: tag match offsets are translated back into the original
//! text through the kept-region map of the first pass.

use rvi_blocks::Block;

use crate::span::{collapse_blank_lines, map_to_raw, remove_spans, remove_spans_mapped};
use crate::{json, tag};

/// Run both directive grammars over `text`.
///
/// Returns the text with every matched span of either grammar removed
/// (blank runs collapsed, ends trimmed) and all blocks in document
/// order. Never fails.
///
/// # Example
///
/// ```
/// use rvi_extract::extract_directives;
/// use rvi_blocks::TypeTag;
///
/// let text = "[rvisteps]a[/rvisteps]\n\n【RVI-JSON】{\"metrics\":[]}【/RVI-JSON】";
/// let (cleaned, blocks) = extract_directives(text);
/// assert_eq!(cleaned, "");
/// assert_eq!(blocks[0].type_tag, TypeTag::Steps);
/// assert_eq!(blocks[1].type_tag, TypeTag::Metrics);
/// ```
#[must_use]
pub fn extract_directives(text: &str) -> (String, Vec<Block>) {
    let json_matches = json::matches(text);
    let json_spans: Vec<(usize, usize)> = json_matches.iter().map(|m| (m.start, m.end)).collect();
    let (intermediate, gaps) = remove_spans_mapped(text, &json_spans);

    let tag_matches = tag::matches(&intermediate);
    let tag_spans: Vec<(usize, usize)> = tag_matches.iter().map(|m| (m.start, m.end)).collect();
    let cleaned = collapse_blank_lines(&remove_spans(&intermediate, &tag_spans));

    let mut positioned: Vec<(usize, Block)> = json_matches
        .into_iter()
        .map(|m| (m.start, m.block))
        .chain(
            tag_matches
                .into_iter()
                .map(|m| (map_to_raw(&gaps, m.start), m.block)),
        )
        .collect();
    positioned.sort_by_key(|(position, _)| *position);

    (cleaned, positioned.into_iter().map(|(_, block)| block).collect())
}
