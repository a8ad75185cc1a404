//! Block and inline-style document model.
//!
//! This module handles:
//! - Inline style kinds and their visual attributes
//! - Blocks of text with non-overlapping style ranges
//! - The ordered block list and its selection

mod block;
mod style;
mod types;

pub use block::{Block, BlockId, StyleRange, byte_index};
pub use style::{InlineStyle, StyleSet, TextColor, VisualAttributes};
pub use types::{Document, Motion, Selection};
