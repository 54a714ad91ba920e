//! Flag Finder: a Zellij plugin for looking up countries by their flags.
//!
//! The plugin loads the full country list once at startup and offers two
//! ways to search it:
//! - **Describe a Flag**: a free-text description ("red circle on white") is
//!   sent to a chat-completion model, which answers with ISO 3166-1 alpha-3
//!   codes that are then matched against the catalog
//! - **Search by Name**: a debounced, case-insensitive substring filter over
//!   common and official names
//!
//! The model API key is entered in a settings overlay and persisted by a
//! background worker.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Plugin runtime (main.rs)                           │  ← Zellij host calls
//! └─────────────────────────────────────────────────────┘
//!                        │ Event ↓   ↑ Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Application layer (app/)                           │  ← Mode controller
//! │  - Event handling, debounce, busy/generation gate   │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ catalog/      │   │ search/       │   │ worker/       │
//! │ - load, sort  │   │ - filter      │   │ - credential  │
//! │               │   │ - model match │   │   load/save   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  domain/ · net/ · storage/ · infrastructure/ · ui/  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry spans exported to a rotating file  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/flagfinder.wasm" {
//!         initial_mode "description"
//!         debounce_ms "300"
//!         model "gpt-3.5-turbo"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Library usage
//!
//! ```
//! use flagfinder::{handle_event, initialize, Config, Event};
//! use flagfinder::net::RequestKind;
//!
//! let mut state = initialize(&Config::default());
//! let body = br#"[{"name": {"common": "France", "official": "French Republic"},
//!                  "cca3": "FRA", "region": "Europe", "flags": {"png": "fr.png"}}]"#;
//! let event = Event::WebResponse { kind: RequestKind::Catalog, status: 200, body: body.to_vec() };
//! let (should_render, _actions) = handle_event(&mut state, &event)?;
//! assert!(should_render);
//! assert_eq!(state.catalog.len(), 1);
//! # Ok::<(), flagfinder::FlagFinderError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod net;
pub mod observability;
pub mod search;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, SearchMode};
pub use domain::{Country, FlagFinderError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::time::Duration;

/// Default country data endpoint.
pub const DEFAULT_COUNTRIES_URL: &str = "https://restcountries.com/v3.1/all";

/// Default chat-completion endpoint.
pub const DEFAULT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default completion model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default quiescence window for direct-mode keystrokes.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Plugin configuration parsed from the Zellij layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// "All countries" resource of the country data service.
    pub countries_url: String,

    /// Chat-completion endpoint used for description searches.
    pub completions_url: String,

    /// Model identifier sent with every completion request.
    pub model: String,

    /// How long typing must pause before the direct filter runs.
    pub debounce: Duration,

    /// Mode active when the plugin opens.
    pub initial_mode: SearchMode,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a TOML theme; `~` refers to the host home directory.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing, e.g. `"debug"`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            countries_url: DEFAULT_COUNTRIES_URL.to_string(),
            completions_url: DEFAULT_COMPLETIONS_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            debounce: DEFAULT_DEBOUNCE,
            initial_mode: SearchMode::Description,
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses the plugin configuration map.
    ///
    /// Every key is optional. Blank or unparsable values fall back to the
    /// default for that key.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use std::time::Duration;
    /// use flagfinder::{Config, SearchMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "150".to_string());
    /// map.insert("initial_mode".to_string(), "direct".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.debounce, Duration::from_millis(150));
    /// assert_eq!(config.initial_mode, SearchMode::Direct);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let debounce = text("debounce_ms")
            .and_then(|ms| ms.parse::<u64>().ok())
            .map_or(defaults.debounce, Duration::from_millis);

        let initial_mode = text("initial_mode")
            .and_then(|mode| SearchMode::from_config(&mode))
            .unwrap_or(defaults.initial_mode);

        Self {
            countries_url: text("countries_url").unwrap_or(defaults.countries_url),
            completions_url: text("completions_url").unwrap_or(defaults.completions_url),
            model: text("model").unwrap_or(defaults.model),
            debounce,
            initial_mode,
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level").unwrap_or(defaults.trace_level),
        }
    }

    /// Resolves the configured theme, falling back to the default.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            match Theme::from_file(&path) {
                Ok(theme) => return theme,
                Err(e) => tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default"),
            }
        }

        if let Some(theme_name) = &self.theme_name {
            match Theme::from_name(theme_name) {
                Some(theme) => return theme,
                None => tracing::debug!(theme_name = %theme_name, "unknown theme, using default"),
            }
        }

        Theme::default()
    }
}

/// Creates the initial application state for `config`.
///
/// The catalog starts empty; it is requested once the web access permission
/// is granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(mode = ?config.initial_mode, model = %config.model, "initializing flagfinder plugin");
    AppState::new(config, config.load_theme())
}
