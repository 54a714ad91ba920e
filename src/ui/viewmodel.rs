//! View model types representing renderable UI state.
//!
//! View models are computed by
//! [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. They hold display-ready data only: strings
//! already truncated, highlight ranges already computed, the card list
//! already windowed.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Title and mode tabs.
    pub header: HeaderInfo,

    /// The text field of the active mode.
    pub input: InputBoxInfo,

    /// The single results slot.
    pub body: BodyView,

    /// Present while the settings overlay is open.
    pub settings: Option<SettingsInfo>,

    /// Keybinding hints.
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, including the catalog size once loaded.
    pub title: String,

    /// One entry per search mode, in display order.
    pub tabs: Vec<TabInfo>,
}

/// A mode tab in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub label: String,
    pub is_active: bool,
}

/// The input box of the active search mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBoxInfo {
    /// Prompt shown before the text, e.g. `"Name: "`.
    pub label: String,

    /// Current field contents.
    pub text: String,

    /// Right-aligned hint, e.g. `"Enter: search"`.
    pub hint: Option<String>,
}

/// What occupies the results slot.
///
/// Exactly one of these is shown at a time; every search replaces the whole
/// slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyView {
    /// Nothing to show, e.g. between submitting a search and its reply.
    Blank,

    /// A progress line such as `"Searching..."`.
    Loading(String),

    /// A single message line: either an error or the no-matches notice.
    Message(String),

    /// The visible window of country cards.
    Cards {
        /// Cards inside the window, in result order.
        items: Vec<DisplayItem>,

        /// Total number of results, including those outside the window.
        total: usize,
    },
}

/// Spaces between the flag image URL and its alt text on a card.
pub const FLAG_GAP: usize = 2;

/// Display information for a single country card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Common name, truncated to the name column.
    pub name: String,

    /// Geographic region.
    pub region: String,

    /// Flag alt text, possibly empty when the column is narrow.
    pub flag: String,

    /// URL of the flag image, standing in for the image itself.
    pub flag_url: String,

    /// Whether this card is under the selection cursor.
    pub is_selected: bool,

    /// Character ranges of `name` to highlight for the direct search term.
    ///
    /// Each tuple is `(start, end)` in char indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Settings overlay display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsInfo {
    /// The API key draft with every character masked.
    pub masked_key: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}
