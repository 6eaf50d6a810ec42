//! Rendered view types.

use rvi_blocks::TypeTag;

/// One rendered block: an HTML fragment plus display metadata.
///
/// The fragment is self-contained (`<div class="rvi-block rvi-...">`
/// wrapper included) with every payload-derived string escaped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockView {
    /// Type that produced this view.
    pub type_tag: TypeTag,
    /// Payload-provided heading, when one was found.
    pub title: Option<String>,
    /// Self-contained HTML fragment. Never empty.
    pub html: String,
}

impl BlockView {
    /// Chip/heading label: the payload title, or the type's display
    /// label when the payload has none.
    #[must_use]
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or_else(|| self.type_tag.label())
    }
}

/// Failure while building one block's view.
///
/// Renderers degrade internally (empty payloads become placeholder
/// views), so this surfaces only genuine bugs; the orchestrator catches
/// it per block and substitutes a fallback view, keeping the rest of
/// the container intact.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A renderer produced an empty fragment.
    #[error("renderer for '{0}' produced an empty view")]
    EmptyView(TypeTag),
}
