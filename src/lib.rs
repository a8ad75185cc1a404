// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditCommand)
    clippy::module_name_repetitions
)]

//! # Markdraft
//!
//! A rich-text editor core driven by markdown-style typing triggers.
//!
//! Typing `# `, `* `, `** ` or `*** ` toggles an inline style at the caret
//! instead of inserting the marker:
//! - `#` toggles a large heading style
//! - `*` toggles bold
//! - `**` toggles red double emphasis
//! - `***` toggles underline
//!
//! ## Architecture
//!
//! Editing is a two-phase pipeline: every event is applied (trigger engine,
//! command router or literal insertion) and the committed document is then
//! sanitized of stray marker characters. The terminal host uses The Elm
//! Architecture (TEA):
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`document`]: Blocks, inline style ranges and the selection
//! - [`editor`]: Trigger engine, command router, sanitizer and session
//! - [`persist`]: Raw record serialization and key-value stores
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod persist;
pub mod ui;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{Document, InlineStyle, Selection};
    pub use crate::editor::{EditCommand, Session, Verdict};
}
