//! Canonical visual-block model for the RVI pipeline.
//!
//! Assistant messages can embed directives that describe visual blocks
//! (key points, comparisons, step sequences, …). This crate defines the
//! canonical [`Block`] produced from those directives, the closed
//! [`TypeTag`] enumeration that selects a renderer, the recursive
//! [`sanitize`] utilities applied to every untrusted payload, the
//! alias-tolerant payload accessors in [`fields`], and the heuristic
//! [`classify`] fallback used when a directive carries no usable type.
//!
//! Everything here is pure and total: no function in this crate returns
//! an error or panics on hostile input.

mod block;
pub mod classify;
pub mod fields;
pub mod sanitize;
mod tag;

pub use block::{Block, Payload};
pub use tag::TypeTag;
