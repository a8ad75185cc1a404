//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::persist::DEFAULT_KEY;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    store_path: Option<PathBuf>,
    key: String,
    fresh: bool,
}

impl App {
    /// Create an application editing the default record in memory.
    pub fn new() -> Self {
        Self {
            store_path: None,
            key: DEFAULT_KEY.to_string(),
            fresh: false,
        }
    }

    /// Persist to a JSON store file instead of memory.
    #[must_use]
    pub fn with_store_path(mut self, path: Option<PathBuf>) -> Self {
        self.store_path = path;
        self
    }

    /// Record key inside the store.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Ignore any stored record at startup.
    #[must_use]
    pub const fn with_fresh(mut self, fresh: bool) -> Self {
        self.fresh = fresh;
        self
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
