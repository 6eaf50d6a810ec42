//! The rendered block container and its disposer.

use crate::overlay::{CloseReason, Overlay};

/// How blocks are presented for the current viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation {
    /// All blocks rendered in the message flow.
    Inline,
    /// Summary trigger plus type chips; blocks open in an overlay.
    Compact,
}

/// One attached render result: the container HTML, its presentation
/// state, and the disposer invoked when the host replaces or removes
/// it.
///
/// Disposal is the owner's responsibility: [`Host::detach`] and the
/// next render call both invoke [`dispose`](Self::dispose), which
/// closes an open overlay (restoring focus) before the container goes
/// away.
///
/// [`Host::detach`]: crate::Host::detach
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockContainer {
    id: String,
    html: String,
    presentation: Presentation,
    block_count: usize,
    overlay: Option<Overlay>,
    animate: bool,
    disposed: bool,
}

impl BlockContainer {
    pub(crate) fn new(
        id: String,
        html: String,
        presentation: Presentation,
        block_count: usize,
        overlay: Option<Overlay>,
        animate: bool,
    ) -> Self {
        Self {
            id,
            html,
            presentation,
            block_count,
            overlay,
            animate,
            disposed: false,
        }
    }

    /// Container element id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The container's HTML.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Presentation chosen for the viewport at render time.
    #[must_use]
    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    /// Number of blocks inside the container.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.block_count
    }

    /// Whether this attach should play the one-shot attention
    /// highlight.
    #[must_use]
    pub fn animate(&self) -> bool {
        self.animate
    }

    /// Overlay state; present only for compact presentation.
    #[must_use]
    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// Mutable overlay state for the host to drive open/close events.
    pub fn overlay_mut(&mut self) -> Option<&mut Overlay> {
        self.overlay.as_mut()
    }

    /// Whether the disposer has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Dispose the container: close an open overlay (restoring focus to
    /// its trigger) and detach its listeners. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if let Some(overlay) = &mut self.overlay {
            overlay.close(CloseReason::Detach);
        }
        self.disposed = true;
    }
}
