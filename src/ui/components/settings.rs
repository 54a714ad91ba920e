//! Settings overlay for entering the API key.

use crate::ui::helpers::{width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SettingsInfo;

const OVERLAY_WIDTH: usize = 56;
const OVERLAY_HEIGHT: usize = 6;

/// Draws the overlay box centered in the pane, on top of whatever is below.
///
/// ```text
/// ┌─ Settings ───────────────────────────┐
/// │                                      │
/// │ OpenAI API key: ********█            │
/// │                                      │
/// │ Enter: save   Esc: cancel            │
/// └──────────────────────────────────────┘
/// ```
pub fn render_settings(frame: &mut Frame, settings: &SettingsInfo, theme: &Theme, rows: usize, cols: usize) {
    let box_width = OVERLAY_WIDTH.min(cols.saturating_sub(2)).max(12);
    let inner_width = box_width.saturating_sub(2);
    let top = rows.saturating_sub(OVERLAY_HEIGHT) / 2 + 1;
    let left = cols.saturating_sub(box_width) / 2 + 1;

    let title = " Settings ";
    frame.position_cursor(top, left);
    frame.fg(&theme.colors.overlay_border);
    frame.push("┌─");
    frame.push(Theme::bold());
    frame.push(title);
    frame.reset();
    frame.fg(&theme.colors.overlay_border);
    frame.push(&"─".repeat(inner_width.saturating_sub(width(title) + 1)));
    frame.push("┐");
    frame.reset();

    let key_line = format!(" OpenAI API key: {}█", settings.masked_key);
    let lines = ["", key_line.as_str(), "", " Enter: save   Esc: cancel"];
    for (offset, line) in lines.iter().enumerate() {
        let line: String = line.chars().take(inner_width).collect();
        frame.position_cursor(top + 1 + offset, left);
        frame.fg(&theme.colors.overlay_border);
        frame.push("│");
        frame.fg(if offset == 3 { &theme.colors.text_dim } else { &theme.colors.text_normal });
        frame.push(&line);
        frame.pad(inner_width.saturating_sub(width(&line)));
        frame.fg(&theme.colors.overlay_border);
        frame.push("│");
        frame.reset();
    }

    frame.position_cursor(top + OVERLAY_HEIGHT - 1, left);
    frame.fg(&theme.colors.overlay_border);
    frame.push(&format!("└{}┘", "─".repeat(inner_width)));
    frame.reset();
}
