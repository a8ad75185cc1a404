use tracing::warn;

use crate::app::{App, Message, Model, ToastLevel};

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        if let Message::Save = msg {
            Self::save(model);
        }
    }

    fn save(model: &mut Model) {
        match model.save_document() {
            Ok(()) => {
                model.dirty = false;
                let message = format!("Saved to {} ({})", model.store_label, model.key);
                model.show_toast(ToastLevel::Info, message);
            }
            Err(err) => {
                warn!(%err, store = %model.store_label, "save failed");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
            }
        }
    }
}
