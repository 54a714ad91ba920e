//! Application state and view model computation.
//!
//! [`AppState`] is the single context passed to every handler: catalog,
//! credential, active mode, both text fields, the result slot, and the busy
//! and generation bookkeeping for in-flight description searches.

use super::debounce::Debouncer;
use super::modes::{InputMode, SearchMode};
use crate::catalog::Catalog;
use crate::domain::error::{FlagFinderError, NO_MATCHES_MESSAGE};
use crate::domain::{Country, Credential};
use crate::search;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BodyView, DisplayItem, FooterInfo, HeaderInfo, InputBoxInfo, SettingsInfo, TabInfo, UIViewModel, FLAG_GAP,
};
use crate::Config;

/// Rows taken by everything except the card list: blank line, title, tabs,
/// border, input box (3), column header, border, footer and one spare.
const CHROME_ROWS: usize = 11;

const NAME_COLUMN_WIDTH: usize = 32;
const REGION_COLUMN_WIDTH: usize = 12;

/// Narrowest alt text worth showing next to the URL.
const MIN_ALT_WIDTH: usize = 8;

/// Contents of the results slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Results {
    /// Nothing rendered yet, or cleared while a search is in flight.
    #[default]
    Cleared,

    /// One message line, for errors and for empty results.
    Message(String),

    /// Countries in display order.
    Cards(Vec<Country>),
}

/// Endpoints and model used for outbound requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub countries_url: String,
    pub completions_url: String,
    pub model: String,
}

/// Central application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Every country, as loaded once at startup.
    pub catalog: Catalog,

    /// Set once the catalog request has been issued.
    pub catalog_requested: bool,

    /// True between issuing the catalog request and its completion.
    pub catalog_pending: bool,

    /// API key for description searches. Empty until loaded or saved.
    pub credential: Credential,

    /// Active search pipeline.
    pub mode: SearchMode,

    /// Where keystrokes go.
    pub input_mode: InputMode,

    /// Text of the direct name field.
    pub direct_input: String,

    /// Text of the flag description field.
    pub description_input: String,

    /// API key being edited in the settings overlay.
    pub settings_draft: String,

    /// The single results slot.
    pub results: Results,

    /// A description search is in flight; further submits are ignored.
    pub busy: bool,

    /// Generation of the most recently issued description search.
    ///
    /// Completions carrying any other generation are stale and dropped.
    pub generation: u64,

    pub debouncer: Debouncer,

    /// Cursor position within the card list.
    pub selected_index: usize,

    pub endpoints: Endpoints,

    /// Tracing filter forwarded to the storage worker.
    pub trace_level: String,

    pub theme: Theme,
}

impl AppState {
    #[must_use]
    pub fn new(config: &Config, theme: Theme) -> Self {
        Self {
            catalog: Catalog::default(),
            catalog_requested: false,
            catalog_pending: false,
            credential: Credential::default(),
            mode: config.initial_mode,
            input_mode: InputMode::Search,
            direct_input: String::new(),
            description_input: String::new(),
            settings_draft: String::new(),
            results: Results::Cleared,
            busy: false,
            generation: 0,
            debouncer: Debouncer::new(config.debounce),
            selected_index: 0,
            endpoints: Endpoints {
                countries_url: config.countries_url.clone(),
                completions_url: config.completions_url.clone(),
                model: config.model.clone(),
            },
            trace_level: config.trace_level.clone(),
            theme,
        }
    }

    /// Text of the field belonging to the active mode.
    #[must_use]
    pub fn active_input(&self) -> &str {
        match self.mode {
            SearchMode::Direct => &self.direct_input,
            SearchMode::Description => &self.description_input,
        }
    }

    pub fn active_input_mut(&mut self) -> &mut String {
        match self.mode {
            SearchMode::Direct => &mut self.direct_input,
            SearchMode::Description => &mut self.description_input,
        }
    }

    /// Replaces the result slot with a result list.
    ///
    /// An empty list is shown as the no-matches message.
    pub fn display_results(&mut self, countries: Vec<Country>) {
        tracing::debug!(result_count = countries.len(), "displaying results");
        self.selected_index = 0;
        self.results = if countries.is_empty() {
            Results::Message(NO_MATCHES_MESSAGE.to_string())
        } else {
            Results::Cards(countries)
        };
    }

    /// Renders the whole catalog sorted by common name.
    pub fn show_full_catalog(&mut self) {
        let sorted = self.catalog.sorted_by_name();
        self.display_results(sorted);
    }

    /// Replaces the result slot with the user-facing message for `error`.
    pub fn show_error(&mut self, error: &FlagFinderError) {
        tracing::debug!(error = %error, "showing error");
        self.selected_index = 0;
        self.results = Results::Message(error.user_message().to_string());
    }

    /// Clears the result slot.
    pub fn clear_results(&mut self) {
        self.selected_index = 0;
        self.results = Results::Cleared;
    }

    /// Countries currently in the result slot, if it holds cards.
    #[must_use]
    pub fn result_countries(&self) -> &[Country] {
        match &self.results {
            Results::Cards(countries) => countries,
            Results::Cleared | Results::Message(_) => &[],
        }
    }

    pub fn move_selection_down(&mut self) {
        let len = self.result_countries().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    pub fn move_selection_up(&mut self) {
        let len = self.result_countries().len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Opens the settings overlay with the current key as the draft.
    pub fn open_settings(&mut self) {
        self.settings_draft = self.credential.expose().to_string();
        self.input_mode = InputMode::Settings;
    }

    pub fn close_settings(&mut self) {
        self.settings_draft.clear();
        self.input_mode = InputMode::Search;
    }

    /// Computes a renderable view model for the given pane size.
    ///
    /// The card list is windowed so the selected card stays visible: the
    /// window is centered on the selection and pulled back at either end so
    /// it stays full whenever there are enough cards.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        UIViewModel {
            header: self.compute_header(),
            input: self.compute_input_box(),
            body: self.compute_body(rows, cols),
            settings: self.compute_settings(),
            footer: self.compute_footer(),
        }
    }

    fn compute_body(&self, rows: usize, cols: usize) -> BodyView {
        if self.catalog_pending {
            return BodyView::Loading("Loading countries...".to_string());
        }
        if self.busy {
            return BodyView::Loading("Searching...".to_string());
        }

        let countries = match &self.results {
            Results::Cleared => return BodyView::Blank,
            Results::Message(message) => return BodyView::Message(message.clone()),
            Results::Cards(countries) => countries,
        };

        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(countries.len());
        if visible_end - visible_start < available_rows && countries.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let highlight_term = match self.mode {
            SearchMode::Direct => self.direct_input.trim(),
            SearchMode::Description => "",
        };

        let items = countries[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, country)| {
                Self::compute_display_item(
                    country,
                    visible_start + offset == self.selected_index,
                    highlight_term,
                    cols,
                )
            })
            .collect();

        BodyView::Cards {
            items,
            total: countries.len(),
        }
    }

    fn compute_display_item(country: &Country, is_selected: bool, term: &str, cols: usize) -> DisplayItem {
        let max_flag_width = cols.saturating_sub(NAME_COLUMN_WIDTH + REGION_COLUMN_WIDTH + 2);

        let name = truncate(&country.name.common, NAME_COLUMN_WIDTH - 2);
        let highlight_ranges = search::match_ranges(&name, term);

        // The image URL takes the flag column first; alt text gets what is left.
        let flag_url = truncate(&country.flags.png, max_flag_width);
        let alt_width = if flag_url.is_empty() {
            max_flag_width
        } else {
            max_flag_width.saturating_sub(flag_url.chars().count() + FLAG_GAP)
        };
        let flag = if alt_width < MIN_ALT_WIDTH && !flag_url.is_empty() {
            String::new()
        } else {
            truncate(&country.flag_alt(), alt_width)
        };

        DisplayItem {
            name,
            region: truncate(&country.region, REGION_COLUMN_WIDTH - 1),
            flag,
            flag_url,
            is_selected,
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = if self.catalog.is_empty() {
            " Flag Finder ".to_string()
        } else {
            format!(" Flag Finder ({} countries) ", self.catalog.len())
        };

        let tabs = [SearchMode::Description, SearchMode::Direct]
            .into_iter()
            .map(|mode| TabInfo {
                label: mode.label().to_string(),
                is_active: mode == self.mode,
            })
            .collect();

        HeaderInfo { title, tabs }
    }

    fn compute_input_box(&self) -> InputBoxInfo {
        match self.mode {
            SearchMode::Direct => InputBoxInfo {
                label: "Name: ".to_string(),
                text: self.direct_input.clone(),
                hint: None,
            },
            SearchMode::Description => InputBoxInfo {
                label: "Describe: ".to_string(),
                text: self.description_input.clone(),
                hint: (!self.busy).then(|| "Enter: search".to_string()),
            },
        }
    }

    fn compute_settings(&self) -> Option<SettingsInfo> {
        (self.input_mode == InputMode::Settings).then(|| SettingsInfo {
            masked_key: "*".repeat(self.settings_draft.chars().count()),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.mode) {
            (InputMode::Settings, _) => "Type API key  Enter: save  Esc: cancel",
            (InputMode::Search, SearchMode::Description) => {
                "Tab: switch mode  Enter: search  Up/Down: navigate  Ctrl+e: settings  Esc: close"
            }
            (InputMode::Search, SearchMode::Direct) => {
                "Tab: switch mode  Type to filter  Up/Down: navigate  Ctrl+e: settings  Esc: close"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Shortens `text` to at most `max_chars` chars, marking the cut with `...`.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut shortened: String = text.chars().take(keep).collect();
    shortened.push_str("...");
    shortened
}
