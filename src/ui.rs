//! Terminal view for the interactive host.
//!
//! One content area showing the buffer from the current scroll offset,
//! one status line at the bottom. Toasts temporarily replace the status
//! text.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};
use crate::editor::LineBuffer;

/// Render the full frame.
pub fn view(model: &Model, frame: &mut Frame) {
    let [content, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());
    render_content(model, frame, content);
    render_status(model, frame, status);
}

fn render_content(model: &Model, frame: &mut Frame, area: Rect) {
    let top = model.scroll_offset;
    let height = usize::from(area.height);
    let mut lines = Vec::with_capacity(height);
    for idx in top..top + height {
        let Some(text) = model.buffer.line_at(idx) else {
            break;
        };
        lines.push(Line::raw(text));
    }
    frame.render_widget(Paragraph::new(lines), area);

    let cursor = model.buffer.cursor();
    if cursor.line >= top && cursor.line < top + height {
        let col = u16::try_from(cursor.col)
            .unwrap_or(u16::MAX)
            .min(area.width.saturating_sub(1));
        let row = u16::try_from(cursor.line - top).unwrap_or(0);
        frame.set_cursor_position((area.x + col, area.y + row));
    }
}

fn render_status(model: &Model, frame: &mut Frame, area: Rect) {
    let (text, style) = if let Some((level, message)) = model.toast() {
        let style = match level {
            ToastLevel::Info => Style::default().fg(Color::Green),
            ToastLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        };
        (format!(" {message}"), style)
    } else {
        let dirty = if model.buffer.is_dirty() { " [+]" } else { "" };
        let synced = model
            .last_synced
            .as_deref()
            .map_or_else(String::new, |entry| format!("  synced {entry}"));
        (
            format!(
                " {}{dirty}{synced}  Ctrl+S save  Ctrl+Q quit",
                model.file_path.display()
            ),
            Style::default().add_modifier(Modifier::REVERSED),
        )
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}
