//! Metric cards.

use std::fmt::Write;

use rvi_blocks::{Block, fields};

use crate::escape::escape_html;
use crate::view::BlockView;

use super::{block_title, empty_state, finish};

const METRIC_KEYS: &[&str] = &["metrics", "kpis", "values", "items"];
const VALUE_KEYS: &[&str] = &["value", "current", "amount"];
const DELTA_KEYS: &[&str] = &["delta", "change", "trend"];
const TARGET_KEYS: &[&str] = &["target", "goal"];

/// Trend direction inferred from a delta's sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    fn class(self) -> &'static str {
        match self {
            Self::Up => "rvi-trend-up",
            Self::Down => "rvi-trend-down",
            Self::Flat => "rvi-trend-flat",
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            Self::Up => "&#9650;",
            Self::Down => "&#9660;",
            Self::Flat => "&#9632;",
        }
    }
}

/// Infer a trend from a delta string: explicit sign first, numeric sign
/// second, flat otherwise.
fn trend_of(delta: &str) -> Trend {
    let trimmed = delta.trim();
    if trimmed.starts_with('+') {
        return Trend::Up;
    }
    if trimmed.starts_with('-') {
        return Trend::Down;
    }
    let numeric: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    match numeric.parse::<f64>() {
        Ok(n) if n > 0.0 => Trend::Up,
        _ => Trend::Flat,
    }
}

/// Metric cards with delta trend and optional target.
pub(crate) fn metrics(block: &Block) -> BlockView {
    let block_unit = fields::text_field(&block.payload, &["unit"]);
    let entries: Vec<_> = fields::list_field(&block.payload, METRIC_KEYS)
        .unwrap_or_default()
        .iter()
        .map(fields::normalize_entry)
        .filter(|entry| !entry.is_empty())
        .collect();

    if entries.is_empty() {
        return finish(block, block_title(block), &empty_state("No metrics reported."));
    }

    let mut body = String::from(r#"<div class="rvi-metrics-grid">"#);
    for entry in &entries {
        body.push_str(r#"<div class="rvi-metric-card">"#);
        if let Some(label) = &entry.text {
            let _ = write!(body, r#"<span class="rvi-metric-label">{}</span>"#, escape_html(label));
        }

        // Tuple form carries the value in position 1.
        let value = fields::text_field(&entry.map, VALUE_KEYS).or_else(|| entry.detail.clone());
        if let Some(value) = value {
            let unit = fields::text_field(&entry.map, &["unit"]).or_else(|| block_unit.clone());
            match unit {
                Some(unit) => {
                    let _ = write!(
                        body,
                        r#"<span class="rvi-metric-value">{}&#8202;{}</span>"#,
                        escape_html(&value),
                        escape_html(&unit)
                    );
                }
                None => {
                    let _ = write!(body, r#"<span class="rvi-metric-value">{}</span>"#, escape_html(&value));
                }
            }
        }

        let delta = fields::text_field(&entry.map, DELTA_KEYS).or_else(|| entry.third.clone());
        if let Some(delta) = delta {
            let trend = trend_of(&delta);
            let _ = write!(
                body,
                r#"<span class="rvi-metric-delta {}">{} {}</span>"#,
                trend.class(),
                trend.glyph(),
                escape_html(&delta)
            );
        }

        if let Some(target) = fields::text_field(&entry.map, TARGET_KEYS) {
            let _ = write!(
                body,
                r#"<span class="rvi-metric-target">target {}</span>"#,
                escape_html(&target)
            );
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
        Block::new(TypeTag::Metrics, sanitize::ensure_object(&payload))
    }

    #[test]
    fn test_trend_of() {
        assert_eq!(trend_of("+5%"), Trend::Up);
        assert_eq!(trend_of("-3"), Trend::Down);
        assert_eq!(trend_of("12%"), Trend::Up);
        assert_eq!(trend_of("0"), Trend::Flat);
        assert_eq!(trend_of("steady"), Trend::Flat);
    }

    #[test]
    fn test_metric_card_fields() {
        let view = metrics(&block(json!({"metrics": [
            {"name": "p99 latency", "value": 18, "unit": "ms", "delta": "-2", "target": 20}
        ]})));
        assert!(view.html.contains(r#"<span class="rvi-metric-label">p99 latency</span>"#));
        assert!(view.html.contains("18&#8202;ms"));
        assert!(view.html.contains("rvi-trend-down"));
        assert!(view.html.contains("&#9660;"));
        assert!(view.html.contains("target 20"));
    }

    #[test]
    fn test_block_level_unit() {
        let view = metrics(&block(json!({"unit": "req/s", "kpis": [{"label": "peak", "value": 950}]})));
        assert!(view.html.contains("950&#8202;req/s"));
    }

    #[test]
    fn test_tuple_metric() {
        let view = metrics(&block(json!({"values": [["errors", "12", "+4"]]})));
        assert!(view.html.contains("errors"));
        assert!(view.html.contains("12"));
        assert!(view.html.contains("rvi-trend-up"));
    }

    #[test]
    fn test_zero_value_is_rendered() {
        let view = metrics(&block(json!({"metrics": [{"label": "open bugs", "value": 0}]})));
        assert!(view.html.contains(r#"<span class="rvi-metric-value">0</span>"#));
    }

    #[test]
    fn test_empty_placeholder() {
        let view = metrics(&block(json!({"metrics": []})));
        assert!(view.html.contains("No metrics reported."));
    }
}
