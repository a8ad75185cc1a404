use std::time::{Duration, Instant};

use crate::document::{Document, StyleSet};
use crate::editor::{PendingMarker, Session};
use crate::persist::{self, DEFAULT_KEY, KeyValueStore, MemoryStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// Current document and pending marker
    pub session: Session,
    /// Where saves go
    store: Box<dyn KeyValueStore>,
    /// Human-readable store location for the status bar
    pub store_label: String,
    /// Record key inside the store
    pub key: String,
    /// Whether the document changed since the last save or load
    pub dirty: bool,
    toast: Option<Toast>,
    /// Set after first quit attempt with unsaved changes; allows second quit to proceed
    pub quit_confirmed: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Index of the first visible block
    pub scroll_offset: usize,
    pub width: u16,
    pub height: u16,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("store_label", &self.store_label)
            .field("key", &self.key)
            .field("dirty", &self.dirty)
            .field("blocks", &self.document().blocks().len())
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model editing `document` with an in-memory store.
    pub fn new(document: Document, terminal_size: (u16, u16)) -> Self {
        Self {
            session: Session::new(document),
            store: Box::new(MemoryStore::new()),
            store_label: "memory".to_string(),
            key: DEFAULT_KEY.to_string(),
            dirty: false,
            toast: None,
            quit_confirmed: false,
            should_quit: false,
            scroll_offset: 0,
            width: terminal_size.0,
            height: terminal_size.1,
        }
    }

    #[must_use]
    pub fn with_store(mut self, store: Box<dyn KeyValueStore>, label: impl Into<String>) -> Self {
        self.store = store;
        self.store_label = label.into();
        self
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub const fn document(&self) -> &Document {
        self.session.document()
    }

    pub const fn pending(&self) -> PendingMarker {
        self.session.pending()
    }

    /// Styles the next typed character would get.
    pub fn active_styles(&self) -> StyleSet {
        self.document().current_inline_styles()
    }

    /// Rows available for document text, below which sit the toast and status bars.
    pub fn editor_rows(&self) -> usize {
        let footer = 1 + u16::from(self.toast.is_some());
        usize::from(self.height.saturating_sub(footer))
    }

    /// Scroll so the caret block is on screen.
    pub(super) fn ensure_caret_visible(&mut self) {
        let doc = self.document();
        let caret_line = doc.block_index(doc.selection().block).unwrap_or(0);
        let rows = self.editor_rows();
        if rows == 0 {
            self.scroll_offset = caret_line;
            return;
        }
        if caret_line < self.scroll_offset {
            self.scroll_offset = caret_line;
        } else if caret_line >= self.scroll_offset + rows {
            self.scroll_offset = caret_line + 1 - rows;
        }
    }

    /// Write the current document to the store under the configured key.
    pub(super) fn save_document(&mut self) -> crate::Result<()> {
        persist::save(self.store.as_mut(), &self.key, self.session.document())
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    #[cfg(test)]
    pub(super) fn stored_record(&self) -> Option<String> {
        self.store.get(&self.key).ok().flatten()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Document::empty(), (80, 24))
    }
}
