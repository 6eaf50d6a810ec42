//! The total type → renderer mapping.

use rvi_blocks::{Block, TypeTag};

use crate::templates;
use crate::view::{BlockView, RenderError};

/// A per-type render function.
pub type RenderFn = fn(&Block) -> BlockView;

/// Look up the renderer for a type.
///
/// The match is exhaustive over the closed [`TypeTag`] enum, so lookup
/// is total: there is no unknown-key case left to default (parsing
/// already folded unrecognized names into [`TypeTag::Fallback`]).
#[must_use]
pub fn renderer_for(type_tag: TypeTag) -> RenderFn {
    match type_tag {
        TypeTag::Keypoints => templates::keypoints,
        TypeTag::Comparison => templates::comparison,
        TypeTag::Steps => templates::steps,
        TypeTag::Checklist => templates::checklist,
        TypeTag::Timeline => templates::timeline,
        TypeTag::Tradeoffs => templates::tradeoffs,
        TypeTag::CauseEffect => templates::cause_effect,
        TypeTag::Metrics => templates::metrics,
        TypeTag::Fallback => templates::fallback,
    }
}

/// Render one block through the registry.
///
/// # Errors
///
/// Returns [`RenderError::EmptyView`] if a renderer violated its
/// never-empty contract; callers substitute a fallback view.
pub fn render_block(block: &Block) -> Result<BlockView, RenderError> {
    let view = (renderer_for(block.type_tag))(block);
    if view.html.trim().is_empty() {
        return Err(RenderError::EmptyView(block.type_tag));
    }
    Ok(view)
}
