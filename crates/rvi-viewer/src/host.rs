//! The host node a container attaches to.

use crate::container::BlockContainer;

/// The UI node representing one chat message.
///
/// The host owns the attached container and the per-host "already
/// animated" marker; there is no process-wide registry, so disjoint
/// hosts can never interfere with each other's animation state.
#[derive(Debug)]
pub struct Host {
    id: String,
    viewport_width: u32,
    attached: Option<BlockContainer>,
    animated: bool,
}

impl Host {
    /// Create a host for the message `id` at the given viewport width
    /// (px).
    #[must_use]
    pub fn new(id: impl Into<String>, viewport_width: u32) -> Self {
        Self {
            id: id.into(),
            viewport_width,
            attached: None,
            animated: false,
        }
    }

    /// Host (message) identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current viewport width in pixels.
    #[must_use]
    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    /// Update the viewport width; takes effect on the next render.
    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
    }

    /// The currently attached container, if any.
    #[must_use]
    pub fn attached(&self) -> Option<&BlockContainer> {
        self.attached.as_ref()
    }

    /// Mutable access to the attached container (e.g. to drive its
    /// overlay).
    pub fn attached_mut(&mut self) -> Option<&mut BlockContainer> {
        self.attached.as_mut()
    }

    /// Detach and dispose the current container, if any.
    ///
    /// Returns `true` when something was removed. Must be called when
    /// the message node itself is removed, so an open overlay never
    /// outlives its message.
    pub fn detach(&mut self) -> bool {
        match self.attached.take() {
            Some(mut container) => {
                container.dispose();
                true
            }
            None => false,
        }
    }

    /// Whether the one-shot attention animation has already played.
    #[must_use]
    pub fn has_animated(&self) -> bool {
        self.animated
    }

    /// Attach a new container, disposing any previous one first.
    pub(crate) fn attach(&mut self, container: BlockContainer) {
        self.detach();
        if container.animate() {
            self.animated = true;
        }
        self.attached = Some(container);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{BlockContainer, Presentation};

    fn container(id: &str, animate: bool) -> BlockContainer {
        BlockContainer::new(
            id.to_owned(),
            "<div></div>".to_owned(),
            Presentation::Inline,
            1,
            None,
            animate,
        )
    }

    #[test]
    fn test_attach_replaces_and_disposes() {
        let mut host = Host::new("m1", 1280);
        host.attach(container("first", true));
        host.attach(container("second", false));

        let attached = host.attached().unwrap();
        assert_eq!(attached.id(), "second");
        assert!(!attached.is_disposed());
    }

    #[test]
    fn test_detach_empty_host() {
        let mut host = Host::new("m1", 1280);
        assert!(!host.detach());
    }

    #[test]
    fn test_animated_marker_sticks() {
        let mut host = Host::new("m1", 1280);
        assert!(!host.has_animated());
        host.attach(container("c", true));
        assert!(host.has_animated());
        host.detach();
        assert!(host.has_animated());
    }
}
