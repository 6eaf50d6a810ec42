//! HTML rendering for RVI blocks.
//!
//! A total registry maps each of the nine canonical block types to a
//! renderer building an accessible HTML fragment. Lookup cannot miss
//! (the type enum is closed) and no renderer returns an empty view:
//! zero usable entries produce a localized empty-state placeholder
//! instead of an empty shell.
//!
//! # Example
//!
//! ```
//! use rvi_blocks::{Block, TypeTag, sanitize};
//! use rvi_renderer::render_block;
//!
//! let payload = sanitize::ensure_object(&serde_json::json!({"items": ["fast", "safe"]}));
//! let view = render_block(&Block::new(TypeTag::Keypoints, payload)).unwrap();
//! assert!(view.html.contains("fast"));
//! ```

mod escape;
mod registry;
mod templates;
mod view;

pub use escape::escape_html;
pub use registry::{RenderFn, render_block, renderer_for};
pub use view::{BlockView, RenderError};
