//! List-shaped templates: keypoints, steps, checklist and timeline.

use std::fmt::Write;

use rvi_blocks::{Block, fields};
use rvi_blocks::fields::Entry;

use crate::escape::escape_html;
use crate::view::BlockView;

use super::{block_title, empty_state, finish};

const KEYPOINT_KEYS: &[&str] =
    &["items", "points", "keypoints", "list", "bullets", "entries", "highlights"];
const STEP_KEYS: &[&str] = &["steps", "items", "sequence", "flow"];
const CHECKLIST_KEYS: &[&str] = &["items", "checklist", "tasks"];
const EVENT_KEYS: &[&str] = &["events", "timeline", "milestones", "items"];

/// Normalized, non-empty entries from the first matching list key.
fn entries(block: &Block, keys: &[&str]) -> Vec<Entry> {
    fields::list_field(&block.payload, keys)
        .unwrap_or_default()
        .iter()
        .map(fields::normalize_entry)
        .filter(|entry| !entry.is_empty())
        .collect()
}

fn push_text_and_detail(out: &mut String, entry: &Entry) {
    if let Some(text) = &entry.text {
        let _ = write!(out, r#"<span class="rvi-item-text">{}</span>"#, escape_html(text));
    }
    if let Some(detail) = &entry.detail {
        let _ = write!(out, r#" <span class="rvi-detail">{}</span>"#, escape_html(detail));
    }
}

/// Bulleted key points.
pub(crate) fn keypoints(block: &Block) -> BlockView {
    let items = entries(block, KEYPOINT_KEYS);
    if items.is_empty() {
        return finish(block, block_title(block), &empty_state("No key points found."));
    }

    let mut body = String::from(r#"<ul class="rvi-keypoints-list">"#);
    for entry in &items {
        body.push_str("<li>");
        push_text_and_detail(&mut body, entry);
        body.push_str("</li>");
    }
    body.push_str("</ul>");
    finish(block, block_title(block), &body)
}

/// Ordered steps with optional status and duration.
pub(crate) fn steps(block: &Block) -> BlockView {
    let items = entries(block, STEP_KEYS);
    if items.is_empty() {
        return finish(block, block_title(block), &empty_state("No steps found."));
    }

    let mut body = String::from(r#"<ol class="rvi-steps-list">"#);
    for entry in &items {
        body.push_str(r#"<li class="rvi-step">"#);
        push_text_and_detail(&mut body, entry);
        if let Some(status) = fields::text_field(&entry.map, &["status", "state"]) {
            let _ = write!(body, r#" <span class="rvi-step-status">{}</span>"#, escape_html(&status));
        }
        let duration = fields::text_field(&entry.map, &["duration", "time", "eta"])
            .or_else(|| entry.third.clone());
        if let Some(duration) = duration {
            let _ = write!(
                body,
                r#" <span class="rvi-step-duration">{}</span>"#,
                escape_html(&duration)
            );
        }
        body.push_str("</li>");
    }
    body.push_str("</ol>");
    finish(block, block_title(block), &body)
}

/// Checkable items with boolean check state.
pub(crate) fn checklist(block: &Block) -> BlockView {
    let items = entries(block, CHECKLIST_KEYS);
    if items.is_empty() {
        return finish(block, block_title(block), &empty_state("Nothing to check off."));
    }

    let mut body = String::from(r#"<ul class="rvi-checklist">"#);
    for entry in &items {
        let checked =
            fields::bool_field(&entry.map, &["checked", "done", "complete"]).unwrap_or(false);
        let (opener, glyph) = if checked {
            (r#"<li class="rvi-check-item is-checked">"#, "&#9745;")
        } else {
            (r#"<li class="rvi-check-item">"#, "&#9744;")
        };
        body.push_str(opener);
        let _ = write!(body, r#"<span class="rvi-check-glyph">{glyph}</span> "#);
        push_text_and_detail(&mut body, entry);
        body.push_str("</li>");
    }
    body.push_str("</ul>");
    finish(block, block_title(block), &body)
}

/// Chronological events with timestamp and status.
pub(crate) fn timeline(block: &Block) -> BlockView {
    let items = entries(block, EVENT_KEYS);
    if items.is_empty() {
        return finish(block, block_title(block), &empty_state("No events recorded."));
    }

    let mut body = String::from(r#"<ol class="rvi-timeline">"#);
    for entry in &items {
        body.push_str(r#"<li class="rvi-event">"#);
        let when = fields::text_field(&entry.map, &["time", "date", "timestamp", "when"]);
        if let Some(when) = when {
            let _ = write!(body, r#"<span class="rvi-event-time">{}</span> "#, escape_html(&when));
        }
        push_text_and_detail(&mut body, entry);
        if let Some(status) = fields::text_field(&entry.map, &["status", "state"]) {
            let _ = write!(body, r#" <span class="rvi-event-status">{}</span>"#, escape_html(&status));
        }
        body.push_str("</li>");
    }
    body.push_str("</ol>");
    finish(block, block_title(block), &body)
}
