//! Top-level rendering coordinator.
//!
//! Computes the view model from `AppState`, draws it into a [`Frame`] and
//! prints the frame.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::helpers::Frame;

/// Renders the plugin UI to stdout.
///
/// Does not clear the screen; Zellij hands the plugin a fresh pane for every
/// render call.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_to_string(state, rows, cols));
}

/// Builds the ANSI output for one frame without printing it.
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let _span = tracing::trace_span!("render", rows, cols).entered();

    let viewmodel = state.compute_viewmodel(rows, cols);
    let mut frame = Frame::new();
    components::render_screen(&mut frame, &viewmodel, &state.theme, cols, rows);
    frame.into_string()
}
