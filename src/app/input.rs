use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;

use crate::app::{App, Message, Model};
use crate::document::Motion;
use crate::editor::EditCommand;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key),
            Event::Paste(text) => Some(Message::Paste(text.clone())),
            Event::Resize(w, h) => {
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            // Application
            KeyCode::Char('s') if ctrl => Some(Message::Save),
            KeyCode::Char('q' | 'c') if ctrl => Some(Message::Quit),

            // Structure
            KeyCode::Enter => Some(Message::Command(EditCommand::SplitBlock)),
            KeyCode::Backspace => Some(Message::Command(EditCommand::Backspace)),
            KeyCode::Delete => Some(Message::Command(EditCommand::Delete)),

            // Caret
            KeyCode::Left => Some(Message::Command(EditCommand::Move(Motion::Left))),
            KeyCode::Right => Some(Message::Command(EditCommand::Move(Motion::Right))),
            KeyCode::Up => Some(Message::Command(EditCommand::Move(Motion::Up))),
            KeyCode::Down => Some(Message::Command(EditCommand::Move(Motion::Down))),
            KeyCode::Home => Some(Message::Command(EditCommand::Move(Motion::Home))),
            KeyCode::End => Some(Message::Command(EditCommand::Move(Motion::End))),

            // Text
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Message::InsertChar(c))
            }

            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
