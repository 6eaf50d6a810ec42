//! The nine per-type block templates.
//!
//! Every template is total: it reads its aliased payload fields, builds
//! a type-specific HTML body, and falls back to a localized empty-state
//! paragraph when nothing usable remains. Payload strings are escaped
//! at the point of interpolation, never before.

mod cards;
mod fallback;
mod flows;
mod grids;
mod lists;

pub(crate) use cards::metrics;
pub(crate) use fallback::fallback;
pub(crate) use flows::cause_effect;
pub(crate) use grids::{comparison, tradeoffs};
pub(crate) use lists::{checklist, keypoints, steps, timeline};

use std::fmt::Write;

use rvi_blocks::{Block, fields};

use crate::escape::escape_html;
use crate::view::BlockView;

/// Block-level title candidates. Narrower than the entry-level
/// [`fields::TITLE_KEYS`]: `key`/`text` name entry content, not block
/// headings.
pub(crate) const BLOCK_TITLE_KEYS: &[&str] = &["title", "label", "heading"];

/// Localized empty-state paragraph.
pub(crate) fn empty_state(message: &str) -> String {
    format!(r#"<p class="rvi-empty">{}</p>"#, escape_html(message))
}

/// Wrap a body in the standard block shell and produce the view.
pub(crate) fn finish(block: &Block, title: Option<String>, body: &str) -> BlockView {
    let mut html = String::with_capacity(body.len() + 96);
    let _ = write!(html, r#"<div class="rvi-block rvi-{}">"#, block.type_tag.as_str());
    if let Some(title) = &title {
        let _ = write!(
            html,
            r#"<div class="rvi-block-title">{}</div>"#,
            escape_html(title)
        );
    }
    html.push_str(body);
    html.push_str("</div>");

    BlockView {
        type_tag: block.type_tag,
        title,
        html,
    }
}

/// Block-level title, shared by most templates.
pub(crate) fn block_title(block: &Block) -> Option<String> {
    fields::text_field(&block.payload, BLOCK_TITLE_KEYS)
}
