//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`render`]: Document lines with inline styles, caret and pending marker
//! - [`style`]: Theming and colors

pub mod style;

mod render;
mod status;

pub use render::{PLACEHOLDER, block_spans, render};

pub const DOCUMENT_LEFT_PADDING: u16 = 2;
