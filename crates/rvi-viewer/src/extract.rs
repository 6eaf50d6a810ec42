//! Content extraction entry point.

use rvi_blocks::Block;

/// Result of scanning one message: cleaned prose plus blocks.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractedContent {
    /// The message text with every directive span removed.
    pub text: String,
    /// Pre-parsed meta blocks first, then extracted blocks in document
    /// order.
    pub blocks: Vec<Block>,
}

/// Extract RVI content from one message.
///
/// Runs the JSON-block grammar over `raw_text`, the tag-block grammar
/// over the already-cleaned result, and prepends `meta_blocks` —
/// pre-parsed blocks attached to a persisted message — after
/// re-normalizing them (payloads sanitized, blank versions restored,
/// unknown types already folded to fallback by deserialization).
///
/// Never fails; text with no directives comes back unchanged aside
/// from whitespace normalization.
#[must_use]
pub fn extract_rvi_content(raw_text: &str, meta_blocks: &[Block]) -> ExtractedContent {
    let (text, extracted) = rvi_extract::extract_directives(raw_text);

    let mut blocks: Vec<Block> = meta_blocks
        .iter()
        .cloned()
        .map(Block::normalized)
        .collect();
    blocks.extend(extracted);

    ExtractedContent { text, blocks }
}
