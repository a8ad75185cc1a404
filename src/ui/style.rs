//! Theming and color definitions.
//!
//! Maps the renderer-independent visual attributes of inline styles onto
//! terminal styles. Uses ANSI colors that adapt to the terminal's palette.

use ratatui::style::{Color, Modifier, Style};

use crate::document::{StyleSet, TextColor, VisualAttributes};

/// Terminal style for a set of visual attributes.
///
/// A terminal cannot enlarge text, so large text is drawn bold in the
/// heading color instead.
pub fn style_for_visual(visual: VisualAttributes) -> Style {
    let mut style = Style::default();
    if visual.large {
        style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
    }
    if visual.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if let Some(color) = visual.color {
        style = style.fg(terminal_color(color));
    }
    if visual.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

pub fn style_for_styles(styles: StyleSet) -> Style {
    style_for_visual(VisualAttributes::for_styles(styles))
}

const fn terminal_color(color: TextColor) -> Color {
    match color {
        TextColor::Red => Color::Red,
    }
}

/// Buffered marker characters shown at the caret.
pub fn pending_marker_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::DIM)
}

pub fn placeholder_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

/// The caret cell, or a selected character.
pub fn caret_style(base: Style) -> Style {
    base.add_modifier(Modifier::REVERSED)
}
