//! Two-phase edit dispatch.
//!
//! Every input event first runs through [`apply_edit`] (trigger engine,
//! command router, or the generic insertion path) and the committed result
//! is then passed through [`sanitize`]. [`Session`] owns the current state
//! for a host.

use std::mem;

use tracing::debug;

use crate::document::{Document, Selection};

use super::command::{self, EditCommand};
use super::sanitize::sanitize;
use super::trigger::{self, CharOutcome, PendingMarker};

/// Everything an editing session carries between events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub document: Document,
    pub pending: PendingMarker,
}

impl EditorState {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            pending: PendingMarker::None,
        }
    }
}

/// An input event from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    Char(char),
    Command(EditCommand),
    Paste(String),
    Select(Selection),
}

/// Whether the formatting layer intercepted an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Handled,
    NotHandled,
}

impl Verdict {
    pub const fn from_handled(handled: bool) -> Self {
        if handled { Self::Handled } else { Self::NotHandled }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: EditorState,
    pub verdict: Verdict,
}

/// First phase: apply one event without cleanup.
pub fn apply_edit(state: EditorState, event: EditEvent) -> Step {
    let EditorState { document, pending } = state;
    match event {
        EditEvent::Char(ch) => {
            let step = trigger::on_char(document, pending, ch);
            let (document, verdict) = match step.outcome {
                CharOutcome::Consumed | CharOutcome::Resolved(_) => (step.document, Verdict::Handled),
                CharOutcome::Insert(text) => (step.document.insert_text(&text), Verdict::NotHandled),
            };
            Step {
                state: EditorState {
                    document,
                    pending: step.pending,
                },
                verdict,
            }
        }
        EditEvent::Command(cmd) => {
            let routed = command::route(document, pending, cmd);
            Step {
                state: EditorState {
                    document: routed.document,
                    pending: routed.pending,
                },
                verdict: Verdict::from_handled(routed.handled),
            }
        }
        EditEvent::Paste(text) => Step {
            state: EditorState::new(document.insert_text(&text)),
            verdict: Verdict::NotHandled,
        },
        EditEvent::Select(selection) => Step {
            state: EditorState::new(document.set_selection(selection)),
            verdict: Verdict::NotHandled,
        },
    }
}

/// Apply one event, then sanitize the committed document.
pub fn dispatch(state: EditorState, event: EditEvent) -> Step {
    let Step { state, verdict } = apply_edit(state, event);
    let document = sanitize(state.document, state.pending);
    Step {
        state: EditorState {
            document,
            pending: state.pending,
        },
        verdict,
    }
}

/// Owns the current editor state and exposes the host-facing entry points.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: EditorState,
}

impl Session {
    pub fn new(document: Document) -> Self {
        Self {
            state: EditorState::new(sanitize(document, PendingMarker::None)),
        }
    }

    pub const fn state(&self) -> &EditorState {
        &self.state
    }

    pub const fn document(&self) -> &Document {
        &self.state.document
    }

    pub const fn pending(&self) -> PendingMarker {
        self.state.pending
    }

    /// Replace the document wholesale, e.g. after a load.
    pub fn replace_document(&mut self, document: Document) {
        self.state = EditorState::new(sanitize(document, PendingMarker::None));
    }

    pub fn on_character_insert(&mut self, ch: char) -> Verdict {
        self.dispatch(EditEvent::Char(ch))
    }

    pub fn on_key_command(&mut self, cmd: EditCommand) -> Verdict {
        self.dispatch(EditEvent::Command(cmd))
    }

    /// Route a command by its binding name; unknown names are not handled.
    pub fn on_key_command_name(&mut self, name: &str) -> Verdict {
        match EditCommand::from_name(name) {
            Some(cmd) => self.on_key_command(cmd),
            None => {
                debug!(name, "unknown key command");
                Verdict::NotHandled
            }
        }
    }

    pub fn on_selection_change(&mut self, selection: Selection) {
        self.dispatch(EditEvent::Select(selection));
    }

    pub fn on_paste(&mut self, text: &str) -> Verdict {
        self.dispatch(EditEvent::Paste(text.to_string()))
    }

    fn dispatch(&mut self, event: EditEvent) -> Verdict {
        let state = mem::take(&mut self.state);
        let step = dispatch(state, event);
        self.state = step.state;
        step.verdict
    }
}
