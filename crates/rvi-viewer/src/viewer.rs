//! Block rendering orchestration.

use std::fmt::Write;

use rvi_blocks::{Block, TypeTag};
use rvi_config::ViewerConfig;
use rvi_renderer::{BlockView, escape_html, render_block};

use crate::container::{BlockContainer, Presentation};
use crate::host::Host;
use crate::overlay::Overlay;

/// What a render call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// A new container was attached to the host.
    Attached {
        /// Number of blocks in the container.
        block_count: usize,
        /// Whether this attach plays the one-shot attention highlight.
        animated: bool,
    },
    /// The render preference resolves to off; `removed` reports whether
    /// stale content was detached.
    Disabled {
        /// A previously attached container was removed.
        removed: bool,
    },
    /// Zero blocks to render; the host was left untouched.
    NoContent,
}

/// Renders block lists into host nodes.
///
/// Rendering is idempotent per host: every call first disposes the
/// previously attached container, so the host re-invoking the pipeline
/// on each streamed message update needs no further coordination.
#[derive(Debug)]
pub struct Viewer {
    config: ViewerConfig,
}

impl Viewer {
    /// Create a viewer with the given configuration.
    #[must_use]
    pub fn new(config: ViewerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Render `blocks` into `host`.
    ///
    /// Preference off removes any stale container and renders nothing;
    /// an empty block list is a no-op. Below the configured breakpoint
    /// the container is compact (summary trigger, type chips, overlay
    /// dialog); otherwise all blocks render inline. A failing renderer
    /// is replaced per block by a fallback view, never propagated.
    pub fn render_rvi_blocks(&self, host: &mut Host, blocks: &[Block]) -> RenderOutcome {
        if !self.config.render_blocks.is_enabled() {
            let removed = host.detach();
            if removed {
                tracing::debug!(host = host.id(), "render preference off; stale container removed");
            }
            return RenderOutcome::Disabled { removed };
        }
        if blocks.is_empty() {
            return RenderOutcome::NoContent;
        }

        let views: Vec<BlockView> = blocks.iter().map(render_or_degrade).collect();
        let container_id = format!("rvi-{}", host.id());

        let compact = host.viewport_width() < self.config.breakpoint;
        let (presentation, html, overlay) = if compact {
            let overlay = Overlay::new(
                format!("{container_id}-trigger"),
                format!("{container_id}-dialog"),
            );
            (
                Presentation::Compact,
                compact_html(&container_id, &views),
                Some(overlay),
            )
        } else {
            (Presentation::Inline, inline_html(&container_id, &views), None)
        };

        let animated = self.config.animate && !host.has_animated();
        let block_count = views.len();
        host.attach(BlockContainer::new(
            container_id,
            html,
            presentation,
            block_count,
            overlay,
            animated,
        ));

        tracing::debug!(
            host = host.id(),
            block_count,
            compact,
            "attached block container"
        );
        RenderOutcome::Attached {
            block_count,
            animated,
        }
    }
}

/// Render one block, substituting a fallback view when the renderer
/// fails, so one bad block cannot blank the whole container.
fn render_or_degrade(block: &Block) -> BlockView {
    match render_block(block) {
        Ok(view) => view,
        Err(err) => {
            tracing::warn!(block_type = %block.type_tag, error = %err, "block renderer failed");
            let message = format!("Render error: {err}");
            match render_block(&Block::fallback_raw(&message)) {
                Ok(view) => view,
                Err(_) => BlockView {
                    type_tag: TypeTag::Fallback,
                    title: None,
                    html: format!(r#"<p class="rvi-empty">{}</p>"#, escape_html(&message)),
                },
            }
        }
    }
}

fn inline_html(container_id: &str, views: &[BlockView]) -> String {
    let mut out = String::with_capacity(views.iter().map(|v| v.html.len()).sum::<usize>() + 128);
    let _ = write!(
        out,
        r#"<div class="rvi-container" id="{container_id}" data-block-count="{}">"#,
        views.len()
    );
    for view in views {
        out.push_str(&view.html);
    }
    out.push_str("</div>");
    out
}

fn compact_html(container_id: &str, views: &[BlockView]) -> String {
    let mut out = String::with_capacity(views.iter().map(|v| v.html.len()).sum::<usize>() + 512);
    let _ = write!(
        out,
        r#"<div class="rvi-container rvi-container--compact" id="{container_id}" data-block-count="{}">"#,
        views.len()
    );

    // Summary trigger.
    let noun = if views.len() == 1 { "visual block" } else { "visual blocks" };
    let _ = write!(
        out,
        r#"<button type="button" class="rvi-summary-trigger" id="{container_id}-trigger" aria-haspopup="dialog" aria-expanded="false" aria-controls="{container_id}-dialog">{} {noun}</button>"#,
        views.len()
    );

    // One chip per block type.
    out.push_str(r#"<div class="rvi-chips">"#);
    for view in views {
        let _ = write!(
            out,
            r#"<span class="rvi-chip rvi-chip-{}">{}</span>"#,
            view.type_tag.as_str(),
            escape_html(view.label())
        );
    }
    out.push_str("</div>");

    // Overlay dialog holding the full views; opened on demand.
    let _ = write!(
        out,
        r#"<div class="rvi-overlay" hidden><div class="rvi-overlay-backdrop"></div><div class="rvi-overlay-dialog" role="dialog" aria-modal="true" id="{container_id}-dialog" tabindex="-1" aria-labelledby="{container_id}-trigger"><button type="button" class="rvi-overlay-close" aria-label="Close">&#215;</button>"#
    );
    for view in views {
        out.push_str(&view.html);
    }
    out.push_str("</div></div></div>");
    out
}
