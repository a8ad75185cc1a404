use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let dirty_indicator = if model.dirty { " [modified]" } else { "" };
    let styles = model.active_styles();
    let style_info = if styles.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = styles.iter().map(|s| s.name()).collect();
        format!("  [{}]", names.join("+"))
    };
    let chars = model.document().char_count();

    let status = format!(
        " {}  {}{}  {} chars{}  Ctrl+S:save  Ctrl+Q:quit",
        model.key, model.store_label, dirty_indicator, chars, style_info
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::Magenta).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
