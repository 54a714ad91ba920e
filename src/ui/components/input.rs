//! Search input box.

use crate::ui::helpers::{width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::InputBoxInfo;

/// Horizontal margin for the input box (spaces on left and right).
const INPUT_BOX_MARGIN: usize = 5;

/// Renders the 3-line bordered input box starting at `row`.
///
/// ```text
/// [margin] ┌──────────────────────────────┐ [margin]
/// [margin] │ Name: fra█      Enter: search│ [margin]
/// [margin] └──────────────────────────────┘ [margin]
/// ```
///
/// Text that does not fit is cut from the left so the cursor end stays
/// visible. Returns the next free row.
pub fn render_input_box(frame: &mut Frame, row: usize, input: &InputBoxInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(INPUT_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);

    frame.position_cursor(row, 1);
    frame.pad(INPUT_BOX_MARGIN);
    frame.fg(&theme.colors.input_border);
    frame.push(&format!("┌{}┐", "─".repeat(inner_width)));
    frame.reset();

    let hint = input.hint.as_deref().unwrap_or("");
    let label = format!(" {}", input.label);
    let text_room = inner_width.saturating_sub(width(&label) + width(hint) + 2);
    let text = tail(&input.text, text_room);
    let used = width(&label) + width(&text) + 1;

    frame.position_cursor(row + 1, 1);
    frame.pad(INPUT_BOX_MARGIN);
    frame.fg(&theme.colors.input_border);
    frame.push("│");
    frame.fg(&theme.colors.text_dim);
    frame.push(&label);
    frame.fg(&theme.colors.text_normal);
    frame.push(&text);
    frame.push("█");
    frame.pad(inner_width.saturating_sub(used + width(hint)));
    frame.fg(&theme.colors.text_dim);
    frame.push(hint);
    frame.fg(&theme.colors.input_border);
    frame.push("│");
    frame.reset();

    frame.position_cursor(row + 2, 1);
    frame.pad(INPUT_BOX_MARGIN);
    frame.fg(&theme.colors.input_border);
    frame.push(&format!("└{}┘", "─".repeat(inner_width)));
    frame.reset();

    row + 3
}

/// The last `max_chars` chars of `text`.
fn tail(text: &str, max_chars: usize) -> String {
    let len = width(text);
    text.chars().skip(len.saturating_sub(max_chars)).collect()
}
