//! Title bar and mode tabs.

use crate::ui::helpers::{width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the centered title at `row` and the tab bar below it.
///
/// Returns the next free row.
pub fn render_header(frame: &mut Frame, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = width(&header.title);
    let padding = cols.saturating_sub(title_len) / 2;

    frame.position_cursor(row, 1);
    frame.push(Theme::bold());
    frame.fg(&theme.colors.header_fg);
    if let Some(bg) = &theme.colors.header_bg {
        frame.bg(bg);
    }
    frame.pad(padding);
    frame.push(&header.title);
    frame.pad(cols.saturating_sub(padding + title_len));
    frame.reset();

    render_tabs(frame, row + 1, header, theme, cols)
}

/// Renders the tabs side by side, centered, the active one filled.
fn render_tabs(frame: &mut Frame, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    const GAP: usize = 2;

    let labels: Vec<String> = header.tabs.iter().map(|tab| format!(" {} ", tab.label)).collect();
    let total: usize = labels.iter().map(|label| width(label)).sum::<usize>()
        + GAP * labels.len().saturating_sub(1);
    let padding = cols.saturating_sub(total) / 2;

    frame.position_cursor(row, 1);
    frame.pad(padding);
    for (index, (tab, label)) in header.tabs.iter().zip(&labels).enumerate() {
        if index > 0 {
            frame.pad(GAP);
        }
        if tab.is_active {
            frame.push(Theme::bold());
            frame.fg(&theme.colors.tab_active_fg);
            frame.bg(&theme.colors.tab_active_bg);
        } else {
            frame.fg(&theme.colors.tab_inactive_fg);
        }
        frame.push(label);
        frame.reset();
    }
    frame.pad(cols.saturating_sub(padding + total));

    row + 1
}
