//! Footer help bar.

use crate::ui::helpers::{width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the keybinding hints centered and dimmed at `row`.
///
/// Text wider than the pane is cut off at the right edge.
pub fn render_footer(frame: &mut Frame, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text: String = footer.keybindings.chars().take(cols).collect();
    let text_len = width(&help_text);
    let padding = cols.saturating_sub(text_len) / 2;

    frame.position_cursor(row, 1);
    frame.fg(&theme.colors.text_dim);
    frame.pad(padding);
    frame.push(&help_text);
    frame.pad(cols.saturating_sub(padding + text_len));
    frame.reset();
    row + 1
}
