//! Search and input mode types.
//!
//! [`SearchMode`] decides which text field is authoritative and which
//! pipeline runs. [`InputMode`] decides where keystrokes go: into the active
//! search field, or into the settings overlay.

/// Which search pipeline is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Substring filter over country names, debounced per keystroke.
    Direct,

    /// Free-text flag description resolved by the language model on submit.
    #[default]
    Description,
}

impl SearchMode {
    /// The other mode.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Direct => Self::Description,
            Self::Description => Self::Direct,
        }
    }

    /// Tab label shown in the header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Direct => "Search by Name",
            Self::Description => "Describe a Flag",
        }
    }

    /// Parses the `initial_mode` configuration value.
    ///
    /// Accepts `direct` and `description`, case-insensitively.
    #[must_use]
    pub fn from_config(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "direct" => Some(Self::Direct),
            "description" => Some(Self::Description),
            _ => None,
        }
    }
}

/// Where keystrokes are routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Typing edits the active search field.
    Search,

    /// The settings overlay is open and typing edits the API key draft.
    Settings,
}
