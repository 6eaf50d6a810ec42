//! Grid-shaped templates: comparison and tradeoffs.

use std::fmt::Write;

use rvi_blocks::{Block, Payload, fields};
use serde_json::Value;

use crate::escape::escape_html;
use crate::view::BlockView;

use super::{block_title, empty_state, finish};

const OPTION_KEYS: &[&str] = &["options", "alternatives", "choices", "items"];
const PRO_KEYS: &[&str] = &["pros", "advantages", "strengths"];
const CON_KEYS: &[&str] = &["cons", "disadvantages", "weaknesses"];
const GAIN_KEYS: &[&str] = &["gains", "pros", "benefits"];
const COST_KEYS: &[&str] = &["costs", "cons", "drawbacks"];

fn push_point_list(out: &mut String, class: &str, label: &str, points: &[Value]) {
    let texts: Vec<String> = points.iter().filter_map(fields::scalar_text).collect();
    if texts.is_empty() {
        return;
    }
    let _ = write!(
        out,
        r#"<div class="{class}"><span class="rvi-section-label">{label}</span><ul>"#
    );
    for text in texts {
        let _ = write!(out, "<li>{}</li>", escape_html(&text));
    }
    out.push_str("</ul></div>");
}

fn push_attribute_table(out: &mut String, attributes: &Payload) {
    if attributes.is_empty() {
        return;
    }
    out.push_str(r#"<table class="rvi-attrs">"#);
    for (key, value) in attributes {
        let Some(text) = fields::scalar_text(value) else {
            continue;
        };
        let _ = write!(
            out,
            "<tr><th>{}</th><td>{}</td></tr>",
            escape_html(key),
            escape_html(&text)
        );
    }
    out.push_str("</table>");
}

/// Option grid with per-option pros, cons and attributes.
pub(crate) fn comparison(block: &Block) -> BlockView {
    let options: Vec<Payload> = fields::list_field(&block.payload, OPTION_KEYS)
        .unwrap_or_default()
        .iter()
        .map(option_payload)
        .filter(|option| !option.is_empty())
        .collect();
    let standalone_attrs = fields::map_field(&block.payload, &["attributes", "specs"]);

    if options.is_empty() && standalone_attrs.is_none() {
        return finish(
            block,
            block_title(block),
            &empty_state("No comparison options found."),
        );
    }

    let mut body = String::from(r#"<div class="rvi-comparison-grid">"#);
    for option in &options {
        body.push_str(r#"<div class="rvi-option">"#);
        if let Some(name) = fields::text_field(option, fields::TITLE_KEYS) {
            let _ = write!(body, r#"<div class="rvi-option-name">{}</div>"#, escape_html(&name));
        }
        if let Some(detail) = fields::text_field(option, fields::DETAIL_KEYS) {
            let _ = write!(body, r#"<div class="rvi-detail">{}</div>"#, escape_html(&detail));
        }
        if let Some(pros) = fields::list_field(option, PRO_KEYS) {
            push_point_list(&mut body, "rvi-pros", "Pros", &pros);
        }
        if let Some(cons) = fields::list_field(option, CON_KEYS) {
            push_point_list(&mut body, "rvi-cons", "Cons", &cons);
        }
        if let Some(attrs) = fields::map_field(option, &["attributes", "attrs", "specs"]) {
            push_attribute_table(&mut body, &attrs);
        }
        body.push_str("</div>");
    }
    if options.is_empty()
        && let Some(attrs) = standalone_attrs
    {
        push_attribute_table(&mut body, &attrs);
    }
    body.push_str("</div>");
    finish(block, block_title(block), &body)
}

/// Normalize one option entry into a map; a bare string becomes a
/// name-only option.
fn option_payload(value: &Value) -> Payload {
    let entry = fields::normalize_entry(value);
    if !entry.map.is_empty() {
        return entry.map;
    }
    let mut option = Payload::new();
    if let Some(text) = entry.text {
        option.insert("name".to_owned(), Value::String(text));
    }
    if let Some(detail) = entry.detail {
        option.insert("detail".to_owned(), Value::String(detail));
    }
    option
}

/// Gains-versus-costs sections, per option or block-wide.
pub(crate) fn tradeoffs(block: &Block) -> BlockView {
    let sections: Vec<Payload> = fields::list_field(&block.payload, &["tradeoffs", "options", "items"])
        .unwrap_or_default()
        .iter()
        .map(option_payload)
        .filter(|section| {
            fields::list_field(section, GAIN_KEYS).is_some()
                || fields::list_field(section, COST_KEYS).is_some()
        })
        .collect();

    let mut body = String::from(r#"<div class="rvi-tradeoffs">"#);
    let mut usable = false;

    for section in &sections {
        usable = true;
        body.push_str(r#"<div class="rvi-tradeoff">"#);
        if let Some(name) = fields::text_field(section, fields::TITLE_KEYS) {
            let _ = write!(body, r#"<div class="rvi-option-name">{}</div>"#, escape_html(&name));
        }
        if let Some(gains) = fields::list_field(section, GAIN_KEYS) {
            push_point_list(&mut body, "rvi-gains", "Gains", &gains);
        }
        if let Some(costs) = fields::list_field(section, COST_KEYS) {
            push_point_list(&mut body, "rvi-costs", "Costs", &costs);
        }
        body.push_str("</div>");
    }

    if sections.is_empty() {
        let gains = fields::list_field(&block.payload, GAIN_KEYS);
        let costs = fields::list_field(&block.payload, COST_KEYS);
        if let Some(gains) = gains {
            usable = true;
            push_point_list(&mut body, "rvi-gains", "Gains", &gains);
        }
        if let Some(costs) = costs {
            usable = true;
            push_point_list(&mut body, "rvi-costs", "Costs", &costs);
        }
    }
    body.push_str("</div>");

    if usable {
        finish(block, block_title(block), &body)
    } else {
        finish(block, block_title(block), &empty_state("No trade-offs listed."))
    }
}
