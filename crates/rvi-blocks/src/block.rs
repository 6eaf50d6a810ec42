//! The canonical block produced from one directive.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::TypeTag;
use crate::sanitize;

/// Sanitized key→value payload of a block.
pub type Payload = serde_json::Map<String, Value>;

fn default_version() -> String {
    "1.0".to_owned()
}

/// A canonical, sanitized, typed visual block.
///
/// Blocks are created fresh on every extraction or render call — either
/// from inline directive text or from pre-parsed blocks attached to a
/// persisted message — consumed by a renderer, and discarded. The wire
/// shape is `{"type": string, "version": string, "payload": object}`.
///
/// # Example
///
/// ```
/// use rvi_blocks::{Block, TypeTag};
///
/// let block: Block =
///     serde_json::from_str(r#"{"type":"steps","payload":{"items":["a"]}}"#).unwrap();
/// assert_eq!(block.type_tag, TypeTag::Steps);
/// assert_eq!(block.version, "1.0");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Canonical type selecting the renderer.
    #[serde(rename = "type", default)]
    pub type_tag: TypeTag,
    /// Payload schema version; `"1.0"` when the directive omits it.
    #[serde(default = "default_version")]
    pub version: String,
    /// Sanitized key→value payload.
    #[serde(default)]
    pub payload: Payload,
}

impl Block {
    /// Create a block with the default version.
    #[must_use]
    pub fn new(type_tag: TypeTag, payload: Payload) -> Self {
        Self {
            type_tag,
            version: default_version(),
            payload,
        }
    }

    /// Create a fallback block wrapping raw, unparseable text.
    ///
    /// The text is sanitized and stored under the `raw` key; an empty
    /// result still yields a non-empty payload so the fallback renderer
    /// always has something to show.
    #[must_use]
    pub fn fallback_raw(text: &str) -> Self {
        let cleaned = sanitize::sanitize_text(text);
        let mut payload = Payload::new();
        payload.insert("raw".to_owned(), Value::String(cleaned));
        Self::new(TypeTag::Fallback, payload)
    }

    /// Re-normalize a block that arrived from outside the pipeline.
    ///
    /// Pre-parsed blocks attached to persisted messages may carry stale
    /// or hand-edited content: the payload is re-sanitized and a blank
    /// version is restored to the default. The type tag needs no work —
    /// deserialization already folds unknown names to fallback.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.payload = sanitize::sanitize_object(&Value::Object(self.payload));
        if self.version.trim().is_empty() {
            self.version = default_version();
        }
        self
    }
}
