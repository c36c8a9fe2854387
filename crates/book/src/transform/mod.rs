//! Transform utilities for post bodies.
//!
//! - `markup`: ordered regex rewrites from Markdown to HTML.

/// Minimal Markdown-to-HTML converter.
pub mod markup;

pub use markup::convert;
