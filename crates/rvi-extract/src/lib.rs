//! Directive extraction for the RVI pipeline.
//!
//! Assistant text can embed visual-block directives in two independent
//! micro-grammars:
//!
//! 1. **JSON-block** ([`extract_json_directives`]): full-width sentinel
//!    pairs `【RVI-JSON】 ... 【/RVI-JSON】`, or fenced code regions
//!    tagged with a recognized JSON language alias, carrying a
//!    structured payload.
//! 2. **Tag-block** ([`extract_tag_directives`]): bracket tags of the
//!    form `[rviXxx attr="val"] body [/rviXxx]` with a fixed identifier
//!    table.
//!
//! Both extractors return the input with every matched span removed
//! (blank runs collapsed) plus the parsed [`Block`]s in document order,
//! and neither can fail: malformed payloads degrade to `fallback`
//! blocks instead. [`extract_directives`] composes the two passes over
//! one message, keeping cross-grammar document order.
//!
//! [`Block`]: rvi_blocks::Block

mod compose;
mod fence;
mod json;
mod lenient;
mod span;
mod tag;

pub use compose::extract_directives;
pub use json::extract_json_directives;
pub use tag::extract_tag_directives;
