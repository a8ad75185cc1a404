use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tracing::{info, warn};

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::document::Document;
use crate::persist::{self, FileStore, KeyValueStore, MemoryStore};

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure. Store failures are reported in the UI.
    pub fn run(&mut self) -> Result<()> {
        let (store, label): (Box<dyn KeyValueStore>, String) = match &self.store_path {
            Some(path) => (Box::new(FileStore::new(path)), path.display().to_string()),
            None => (Box::new(MemoryStore::new()), "memory".to_string()),
        };

        let (document, load_warning) = self.initial_document(store.as_ref());

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - markdraft requires an interactive terminal")?;
        execute!(stdout(), EnableBracketedPaste)?;
        let size = terminal.size()?;

        let mut model = Model::new(document, (size.width, size.height))
            .with_store(store, label)
            .with_key(self.key.clone());
        if let Some(message) = load_warning {
            model.show_toast(ToastLevel::Warning, message);
        }

        let result = Self::event_loop(&mut terminal, &mut model);

        // Restore terminal
        let _ = execute!(stdout(), DisableBracketedPaste);
        ratatui::restore();

        result
    }

    /// Load the stored record unless a fresh start was requested.
    pub(super) fn initial_document(&self, store: &dyn KeyValueStore) -> (Document, Option<String>) {
        if self.fresh {
            info!(key = %self.key, "fresh start, ignoring stored document");
            return (Document::empty(), None);
        }
        match persist::try_load(store, &self.key) {
            Ok(Some(document)) => (document, None),
            Ok(None) => (Document::empty(), None),
            Err(err) => {
                warn!(%err, key = %self.key, "stored document unusable, starting empty");
                (
                    Document::empty(),
                    Some(format!("Stored document ignored: {err}")),
                )
            }
        }
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            // Handle events
            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                if let Some(msg) = Self::handle_event(&event::read()?, event_ms, &mut resize_debouncer) {
                    Self::dispatch(model, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts and pasted keystrokes into a single render.
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    if let Some(msg) = Self::handle_event(&event::read()?, drain_ms, &mut resize_debouncer) {
                        Self::dispatch(model, msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn dispatch(model: &mut Model, msg: Message) {
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, &side_msg);
    }
}
