//! Named editing commands and their routing.

use tracing::debug;

use crate::document::{Document, InlineStyle, Motion};

use super::trigger::PendingMarker;

/// A key command from the host, named the way key bindings name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    SplitBlock,
    Backspace,
    Delete,
    Move(Motion),
}

impl EditCommand {
    pub fn from_name(name: &str) -> Option<Self> {
        let cmd = match name {
            "split-block" => Self::SplitBlock,
            "backspace" => Self::Backspace,
            "delete" => Self::Delete,
            "move-left" => Self::Move(Motion::Left),
            "move-right" => Self::Move(Motion::Right),
            "move-up" => Self::Move(Motion::Up),
            "move-down" => Self::Move(Motion::Down),
            "move-home" => Self::Move(Motion::Home),
            "move-end" => Self::Move(Motion::End),
            _ => return None,
        };
        Some(cmd)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::SplitBlock => "split-block",
            Self::Backspace => "backspace",
            Self::Delete => "delete",
            Self::Move(Motion::Left) => "move-left",
            Self::Move(Motion::Right) => "move-right",
            Self::Move(Motion::Up) => "move-up",
            Self::Move(Motion::Down) => "move-down",
            Self::Move(Motion::Home) => "move-home",
            Self::Move(Motion::End) => "move-end",
        }
    }
}

/// Result of routing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed {
    pub document: Document,
    pub pending: PendingMarker,
    /// Whether the command did anything.
    pub handled: bool,
}

pub fn route(document: Document, pending: PendingMarker, cmd: EditCommand) -> Routed {
    match cmd {
        EditCommand::SplitBlock => Routed {
            document: split_block(document),
            pending: PendingMarker::None,
            handled: true,
        },
        EditCommand::Backspace if !pending.is_empty() => {
            debug!(marker = pending.token(), "backspace dropped buffered marker character");
            Routed {
                document,
                pending: pending.pop(),
                handled: true,
            }
        }
        EditCommand::Backspace => {
            let (document, handled) = document.delete_backward();
            Routed {
                document,
                pending: PendingMarker::None,
                handled,
            }
        }
        EditCommand::Delete => {
            let (document, handled) = document.delete_forward();
            Routed {
                document,
                pending: PendingMarker::None,
                handled,
            }
        }
        EditCommand::Move(motion) => {
            let before = document.selection();
            let document = document.move_caret(motion);
            let handled = document.selection() != before;
            Routed {
                document,
                pending: PendingMarker::None,
                handled,
            }
        }
    }
}

/// Split at the caret, turning off the first active style so the new block
/// starts without it.
fn split_block(document: Document) -> Document {
    let document = document.delete_selection();
    let active = document.current_inline_styles();
    let document = match InlineStyle::ALL.into_iter().find(|style| active.contains(*style)) {
        Some(style) => {
            debug!(%style, "clearing style before block split");
            document.toggle_inline_style(style)
        }
        None => document,
    };
    let caret = document.selection();
    document.split_block(caret.block, caret.start)
}
