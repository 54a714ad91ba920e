//! Color themes and ANSI escape sequence generation.
//!
//! Two Catppuccin themes are built in (`catppuccin-mocha`, the default, and
//! `catppuccin-latte`). Custom themes are TOML files of the same shape:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! tab_active_fg = "#1e1e2e"
//! tab_active_bg = "#89b4fa"
//! tab_inactive_fg = "#6c7086"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! input_border = "#89b4fa"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! message_fg = "#f38ba8"
//! loading_fg = "#94e2d5"
//! overlay_border = "#f5c2e7"
//! ```

use crate::domain::error::{FlagFinderError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CATPPUCCIN_MOCHA: &str = include_str!("../../themes/catppuccin-mocha.toml");
const CATPPUCCIN_LATTE: &str = include_str!("../../themes/catppuccin-latte.toml");

/// A named color scheme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Title text color.
    pub header_fg: String,
    /// Optional title background.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Active mode tab.
    pub tab_active_fg: String,
    pub tab_active_bg: String,
    /// Inactive mode tab.
    pub tab_inactive_fg: String,

    /// Selected card.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, region column and flag text.
    pub text_dim: String,

    /// Separator lines.
    pub border: String,
    /// Frame of the search input box.
    pub input_border: String,

    /// Matched part of a name in direct search.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Error and no-matches line.
    pub message_fg: String,
    /// "Searching..." line.
    pub loading_fg: String,

    /// Frame of the settings overlay.
    pub overlay_border: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => CATPPUCCIN_MOCHA,
            "catppuccin-latte" => CATPPUCCIN_LATTE,
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`FlagFinderError::Theme`] if the file cannot be read or does
    /// not describe a complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| FlagFinderError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| FlagFinderError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Parses `#rrggbb`, falling back to white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground color escape.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background color escape.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        match toml::from_str(CATPPUCCIN_MOCHA) {
            Ok(theme) => theme,
            Err(e) => {
                tracing::error!(error = %e, "built-in theme failed to parse");
                Self::fallback()
            }
        }
    }
}

impl Theme {
    /// Plain theme used only if the embedded default cannot be parsed.
    fn fallback() -> Self {
        let white = "#ffffff".to_string();
        let grey = "#808080".to_string();
        let black = "#000000".to_string();
        Self {
            name: "fallback".to_string(),
            colors: ThemeColors {
                header_fg: white.clone(),
                header_bg: None,
                tab_active_fg: black.clone(),
                tab_active_bg: white.clone(),
                tab_inactive_fg: grey.clone(),
                selection_fg: black.clone(),
                selection_bg: white.clone(),
                text_normal: white.clone(),
                text_dim: grey.clone(),
                border: grey.clone(),
                input_border: white.clone(),
                match_highlight_fg: black,
                match_highlight_bg: white.clone(),
                message_fg: white.clone(),
                loading_fg: grey,
                overlay_border: white,
            },
        }
    }
}
