//! Markdown-trigger editing layer on top of the document model.
//!
//! Keystrokes pass through the trigger engine, key commands through the
//! command router, and every committed change through the sanitizer.

mod command;
mod sanitize;
mod session;
mod trigger;

pub use command::{EditCommand, Routed, route};
pub use sanitize::{has_markers, sanitize};
pub use session::{EditEvent, EditorState, Session, Step, Verdict, apply_edit, dispatch};
pub use trigger::{CharOutcome, CharStep, PendingMarker, is_marker_char, on_char};
