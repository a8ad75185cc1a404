use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::Model;
use crate::document::{Block, Selection};

use super::{DOCUMENT_LEFT_PADDING, status, style};

/// Shown in place of an empty document.
pub const PLACEHOLDER: &str = "Start typing here...";

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);
    let editor_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(toast_active)),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    render_document(model, frame, editor_area);

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);
}

fn render_document(model: &Model, frame: &mut Frame, area: Rect) {
    let doc = model.document();
    let selection = doc.selection();
    let pending = model.pending().token();
    let visible_height = area.height as usize;
    let padding = " ".repeat(DOCUMENT_LEFT_PADDING as usize);

    let content: Vec<Line> = if is_blank(model) {
        vec![Line::from(vec![
            Span::raw(padding),
            Span::styled(" ", style::caret_style(Style::default())),
            Span::styled(PLACEHOLDER, style::placeholder_style()),
        ])]
    } else {
        doc.blocks()
            .iter()
            .skip(model.scroll_offset)
            .take(visible_height)
            .map(|block| {
                let caret = (block.id() == selection.block).then_some(selection);
                let mut spans = vec![Span::raw(padding.clone())];
                spans.extend(block_spans(block, caret, pending));
                Line::from(spans)
            })
            .collect()
    };

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

fn is_blank(model: &Model) -> bool {
    let doc = model.document();
    doc.blocks().len() == 1 && doc.char_count() == 0 && model.pending().is_empty()
}

/// Styled spans for one block.
///
/// `caret` is set for the block holding the selection: a ranged selection is
/// drawn reversed, a collapsed one gets the pending marker (dimmed) followed
/// by a reversed caret cell.
pub fn block_spans(block: &Block, caret: Option<Selection>, pending: &str) -> Vec<Span<'static>> {
    let mut cells: Vec<(char, Style)> = block
        .text()
        .chars()
        .enumerate()
        .map(|(idx, ch)| (ch, style::style_for_styles(block.styles_at(idx))))
        .collect();

    if let Some(selection) = caret {
        if selection.is_collapsed() {
            let at = selection.start.min(cells.len());
            match cells.get_mut(at) {
                Some(cell) => cell.1 = style::caret_style(cell.1),
                None => cells.push((' ', style::caret_style(Style::default()))),
            }
            for (offset, ch) in pending.chars().enumerate() {
                cells.insert(at + offset, (ch, style::pending_marker_style()));
            }
        } else {
            let end = selection.end.min(cells.len());
            for cell in &mut cells[selection.start.min(end)..end] {
                cell.1 = style::caret_style(cell.1);
            }
        }
    }

    coalesce(cells)
}

fn coalesce(cells: Vec<(char, Style)>) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut current = String::new();
    let mut current_style: Option<Style> = None;
    for (ch, cell_style) in cells {
        if current_style.is_some_and(|s| s != cell_style) {
            spans.push(Span::styled(std::mem::take(&mut current), current_style.unwrap_or_default()));
        }
        current.push(ch);
        current_style = Some(cell_style);
    }
    if let Some(s) = current_style {
        spans.push(Span::styled(current, s));
    }
    spans
}
