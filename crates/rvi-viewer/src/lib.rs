//! Viewer orchestration for the RVI pipeline.
//!
//! Composes both directive extractors with externally supplied
//! pre-parsed blocks ([`extract_rvi_content`]), renders blocks through
//! the template registry, and manages the rendered container's
//! lifecycle on a [`Host`]: idempotent detach-then-attach, a tri-state
//! render preference, responsive inline/overlay presentation, and a
//! one-shot attention animation.
//!
//! Nothing here can fail a message render. The worst case for any
//! input is a visible fallback placeholder.
//!
//! # Example
//!
//! ```
//! use rvi_config::ViewerConfig;
//! use rvi_viewer::{Host, Viewer, extract_rvi_content};
//!
//! let content = extract_rvi_content(
//!     "Summary.\n【RVI-JSON】{\"type\":\"keypoints\",\"items\":[\"fast\"]}【/RVI-JSON】",
//!     &[],
//! );
//! assert_eq!(content.text, "Summary.");
//!
//! let viewer = Viewer::new(ViewerConfig::default());
//! let mut host = Host::new("msg-1", 1280);
//! viewer.render_rvi_blocks(&mut host, &content.blocks);
//! assert!(host.attached().is_some());
//! ```

mod container;
mod extract;
mod host;
mod overlay;
mod viewer;

pub use container::{BlockContainer, Presentation};
pub use extract::{ExtractedContent, extract_rvi_content};
pub use host::Host;
pub use overlay::{CloseReason, Overlay};
pub use viewer::{RenderOutcome, Viewer};
