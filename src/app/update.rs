use tracing::trace;

use crate::app::Model;
use crate::editor::{EditCommand, Session, Verdict};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Type a character at the caret
    InsertChar(char),
    /// Run a named editing command (split, delete, caret movement)
    Command(EditCommand),
    /// Insert pasted text literally
    Paste(String),
    /// Write the document to the store
    Save,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Save preserves the quit flag so Ctrl+S can complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }

    match msg {
        Message::InsertChar(ch) => {
            edit(&mut model, |session| session.on_character_insert(ch));
        }
        Message::Command(cmd) => {
            trace!(command = cmd.name(), "key command");
            edit(&mut model, |session| session.on_key_command(cmd));
        }
        Message::Paste(text) => {
            edit(&mut model, |session| session.on_paste(&text));
        }
        // Save: handled in effects
        Message::Save => {}

        // Window
        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
            model.ensure_caret_visible();
        }

        // Application
        Message::Quit => {
            if model.dirty && !model.quit_confirmed {
                model.show_toast(
                    crate::app::ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

/// Run one session entry point, tracking whether the content changed.
fn edit(model: &mut Model, f: impl FnOnce(&mut Session) -> Verdict) {
    let before = model.session.document().clone();
    let verdict = f(&mut model.session);
    if !before.same_content(model.session.document()) {
        model.dirty = true;
    }
    trace!(?verdict, pending = model.pending().token(), "edit applied");
    model.ensure_caret_visible();
}
