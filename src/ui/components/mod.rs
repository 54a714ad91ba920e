//! Composable UI component renderers.
//!
//! - [`header`]: Title and mode tabs
//! - [`input`]: Search input box
//! - [`cards`]: Country card list
//! - [`message`]: Single-line error, empty or progress slot
//! - [`settings`]: API key overlay
//! - [`footer`]: Keybinding hints
//!
//! Screen layout:
//!
//! ```text
//! [blank line]
//! [Title]
//! [Tabs]
//! [Border]
//! [Input box - 3 lines]
//! [Card headers | message]
//! [Cards]
//! [Blank padding to fill screen]
//! [Border]
//! [Footer]
//! ```

mod cards;
mod footer;
mod header;
mod input;
mod message;
mod settings;

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyView, UIViewModel};

use cards::{render_card_headers, render_cards};
use footer::render_footer;
use header::render_header;
use input::render_input_box;
use message::render_message;
use settings::render_settings;

/// Renders a horizontal border line at `row`. Returns the next free row.
fn render_border(frame: &mut Frame, row: usize, color: &str, cols: usize) -> usize {
    frame.position_cursor(row, 1);
    frame.fg(color);
    frame.push(&"─".repeat(cols));
    frame.reset();
    row + 1
}

/// Renders the full screen for a view model.
pub fn render_screen(frame: &mut Frame, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(frame, current_row, &vm.header, theme, cols);
    current_row = render_border(frame, current_row, &theme.colors.border, cols);
    current_row = render_input_box(frame, current_row, &vm.input, theme, cols);

    match &vm.body {
        BodyView::Blank => {}
        BodyView::Loading(text) => {
            render_message(frame, current_row + 1, text, &theme.colors.loading_fg, cols);
        }
        BodyView::Message(text) => {
            render_message(frame, current_row + 1, text, &theme.colors.message_fg, cols);
        }
        BodyView::Cards { items, total } => {
            current_row = render_card_headers(frame, current_row, *total, theme, cols);
            render_cards(frame, current_row, items, theme, cols);
        }
    }

    let footer_row = rows.saturating_sub(1);
    render_border(frame, footer_row.saturating_sub(1), &theme.colors.border, cols);
    render_footer(frame, footer_row, &vm.footer, theme, cols);

    if let Some(settings) = &vm.settings {
        render_settings(frame, settings, theme, rows, cols);
    }
}
