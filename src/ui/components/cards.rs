//! Country card list.
//!
//! Each card is one row with three columns: common name, region, and the
//! flag's alt text standing in for the image.

use crate::ui::helpers::{self, width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, FLAG_GAP};

const NAME_COLUMN: usize = 32;
const REGION_COLUMN: usize = 12;

/// Renders the column headers with the result count on the right.
pub fn render_card_headers(frame: &mut Frame, row: usize, total: usize, theme: &Theme, cols: usize) -> usize {
    let count = format!("{total} result{}", if total == 1 { "" } else { "s" });
    let columns = format!("{:<NAME_COLUMN$}{:<REGION_COLUMN$}{}", "NAME", "REGION", "FLAG");

    frame.position_cursor(row, 1);
    frame.push(Theme::bold());
    frame.fg(&theme.colors.header_fg);
    frame.push(&columns);
    frame.reset();
    frame.fg(&theme.colors.text_dim);
    frame.pad(cols.saturating_sub(width(&columns) + width(&count)));
    frame.push(&count);
    frame.reset();
    row + 1
}

/// Renders every card starting at `row`. Returns the next free row.
pub fn render_cards(frame: &mut Frame, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_card(frame, current_row, item, theme, cols);
    }
    current_row
}

fn render_card(frame: &mut Frame, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    frame.position_cursor(row, 1);

    if item.is_selected {
        frame.fg(&theme.colors.selection_fg);
        frame.bg(&theme.colors.selection_bg);
    } else {
        frame.fg(&theme.colors.text_normal);
    }

    helpers::render_highlighted_text(frame, &item.name, &item.highlight_ranges, theme, item.is_selected);
    frame.pad(NAME_COLUMN.saturating_sub(width(&item.name)));

    if !item.is_selected {
        frame.fg(&theme.colors.text_dim);
    }
    frame.push(&item.region);
    frame.pad(REGION_COLUMN.saturating_sub(width(&item.region)));

    let mut line_len = NAME_COLUMN + REGION_COLUMN;
    if !item.flag_url.is_empty() {
        if !item.is_selected {
            frame.fg(&theme.colors.text_normal);
        }
        frame.push(&item.flag_url);
        line_len += width(&item.flag_url);

        if !item.flag.is_empty() {
            if !item.is_selected {
                frame.fg(&theme.colors.text_dim);
            }
            frame.pad(FLAG_GAP);
            line_len += FLAG_GAP;
        }
    }
    frame.push(&item.flag);
    line_len += width(&item.flag);

    frame.pad(cols.saturating_sub(line_len));
    frame.reset();
    row + 1
}
