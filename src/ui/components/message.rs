//! Single-line message slot for errors, empty results and progress.

use crate::ui::helpers::{width, Frame};
use crate::ui::theme::Theme;

/// Renders `text` centered on `row` in `color`, filling the line.
pub fn render_message(frame: &mut Frame, row: usize, text: &str, color: &str, cols: usize) -> usize {
    let text_len = width(text).min(cols);
    let padding = cols.saturating_sub(text_len) / 2;

    frame.position_cursor(row, 1);
    frame.fg(color);
    frame.pad(padding);
    frame.push(&text.chars().take(text_len).collect::<String>());
    frame.pad(cols.saturating_sub(padding + text_len));
    frame.push(Theme::reset());
    row + 1
}
