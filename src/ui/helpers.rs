//! Shared rendering utilities.
//!
//! Components draw into a [`Frame`] rather than straight to stdout so a whole
//! screen can be built, inspected in tests, and then printed in one go.

use crate::ui::theme::Theme;

/// An ANSI screen being assembled.
#[derive(Debug, Default)]
pub struct Frame {
    buf: String,
}

impl Frame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the cursor to a 1-indexed row and column.
    pub fn position_cursor(&mut self, row: usize, col: usize) {
        self.buf.push_str(&format!("\u{1b}[{row};{col}H"));
    }

    pub fn push(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Appends `count` spaces.
    pub fn pad(&mut self, count: usize) {
        self.buf.extend(std::iter::repeat(' ').take(count));
    }

    pub fn fg(&mut self, hex: &str) {
        self.buf.push_str(&Theme::fg(hex));
    }

    pub fn bg(&mut self, hex: &str) {
        self.buf.push_str(&Theme::bg(hex));
    }

    pub fn reset(&mut self) {
        self.buf.push_str(Theme::reset());
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Display width of `text` in terminal cells, counting one cell per char.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Writes `text`, highlighting the given char ranges.
///
/// On a selected row the highlight is skipped so the selection colors stay
/// intact across the whole line.
pub fn render_highlighted_text(
    frame: &mut Frame,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        frame.push(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        frame.push(&normal_section);

        frame.fg(&theme.colors.match_highlight_fg);
        frame.bg(&theme.colors.match_highlight_bg);
        let highlighted_section: String = chars[start..end].iter().collect();
        frame.push(&highlighted_section);
        frame.reset();
        frame.fg(&theme.colors.text_normal);

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        frame.push(&remaining);
    }
}
