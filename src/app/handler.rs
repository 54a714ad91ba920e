//! Event handling and state transitions.
//!
//! [`handle_event`] is the only place state changes. It takes one event,
//! mutates [`AppState`], and returns whether a re-render is needed together
//! with the side effects to run.
//!
//! Direct mode filters on a debounce timer. Description mode submits
//! explicitly, at most one search at a time, and drops completions from
//! superseded searches by generation.

use crate::app::modes::{InputMode, SearchMode};
use crate::app::{Action, AppState};
use crate::catalog::{catalog_request, parse_catalog_response};
use crate::domain::error::{FlagFinderError, Result};
use crate::domain::Credential;
use crate::net::RequestKind;
use crate::search;
use crate::worker::{WorkerMessage, WorkerResponse};
use zellij_tile::prelude::PermissionType;

/// Events delivered to the handler by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A printable character typed into the focused field.
    Char(char),
    /// Deletes the last character of the focused field.
    Backspace,
    /// Enter: run a description search, or save settings.
    Submit,
    /// Toggles between direct and description mode.
    SwitchMode,
    /// Opens the settings overlay.
    OpenSettings,
    /// Closes the settings overlay, or hides the plugin.
    Escape,
    KeyUp,
    KeyDown,

    /// A host timer elapsed.
    Timer,

    /// An HTTP request issued by [`Action::WebRequest`] completed.
    WebResponse {
        kind: RequestKind,
        status: u16,
        body: Vec<u8>,
    },

    /// A reply from the storage worker.
    WorkerResponse(WorkerResponse),

    /// The user answered the permission prompt.
    PermissionsResult {
        /// Permissions granted; empty when denied.
        granted: Vec<PermissionType>,
    },
}

/// Processes an event and returns `(should_render, actions)`.
///
/// # Errors
///
/// Failures of outbound calls are turned into user-visible messages here and
/// never returned. The `Result` is kept for the runtime loop, which logs any
/// error that does escape.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::PermissionsResult { granted } => Ok(handle_permissions(state, granted)),
        Event::WebResponse { kind, status, body } => Ok(handle_web_response(state, *kind, *status, body)),
        Event::WorkerResponse(response) => Ok(handle_worker_response(state, response)),
        Event::Timer => Ok(handle_timer(state)),
        _ if state.input_mode == InputMode::Settings => Ok(handle_settings_key(state, event)),
        Event::Char(c) => Ok(edit_search_field(state, |field| field.push(*c))),
        Event::Backspace => Ok(edit_search_field(state, |field| {
            field.pop();
        })),
        Event::Submit => Ok(submit(state)),
        Event::SwitchMode => {
            state.mode = state.mode.toggle();
            tracing::debug!(mode = ?state.mode, "search mode switched");
            if state.active_input().trim().is_empty() {
                state.show_full_catalog();
            }
            Ok((true, vec![]))
        }
        Event::OpenSettings => {
            state.open_settings();
            Ok((true, vec![]))
        }
        Event::Escape => Ok((false, vec![Action::CloseFocus])),
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
    }
}

fn handle_permissions(state: &mut AppState, granted: &[PermissionType]) -> (bool, Vec<Action>) {
    if !granted.contains(&PermissionType::WebAccess) {
        tracing::warn!("web access permission denied");
        state.show_error(&FlagFinderError::CatalogLoad("web access not granted".to_string()));
        return (true, vec![]);
    }

    if state.catalog_requested {
        return (false, vec![]);
    }

    state.catalog_requested = true;
    state.catalog_pending = true;
    tracing::debug!(url = %state.endpoints.countries_url, "requesting country catalog");

    (
        true,
        vec![
            Action::WebRequest(catalog_request(&state.endpoints.countries_url)),
            Action::PostToWorker(WorkerMessage::load_credential(Some(state.trace_level.clone()))),
        ],
    )
}

fn handle_web_response(state: &mut AppState, kind: RequestKind, status: u16, body: &[u8]) -> (bool, Vec<Action>) {
    match kind {
        RequestKind::Catalog => {
            state.catalog_pending = false;
            match parse_catalog_response(status, body) {
                Ok(catalog) => {
                    tracing::info!(country_count = catalog.len(), "country catalog loaded");
                    state.catalog = catalog;
                    state.show_full_catalog();
                }
                Err(e) => {
                    tracing::warn!(error = %e, status, "country catalog failed to load");
                    state.show_error(&e);
                }
            }
            (true, vec![])
        }
        RequestKind::Description { generation } => {
            if generation != state.generation {
                tracing::debug!(
                    generation,
                    latest = state.generation,
                    "discarding stale description reply"
                );
                return (false, vec![]);
            }

            state.busy = false;
            match search::parse_reply(status, body) {
                Ok(codes) => {
                    let matched = search::match_codes(&state.catalog, &codes);
                    tracing::debug!(
                        code_count = codes.len(),
                        match_count = matched.len(),
                        "description search completed"
                    );
                    state.display_results(matched);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "description search failed");
                    state.show_error(&e);
                }
            }
            (true, vec![])
        }
    }
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::CredentialLoaded { credential } => {
            state.credential = credential.clone().unwrap_or_default();
            tracing::debug!(has_credential = !state.credential.is_empty(), "credential loaded");
            (false, vec![])
        }
        WorkerResponse::CredentialSaved => {
            tracing::debug!("credential saved");
            (false, vec![])
        }
        WorkerResponse::Error { message } => {
            tracing::error!("Worker error: {}", message);
            (false, vec![])
        }
    }
}

fn handle_timer(state: &mut AppState) -> (bool, Vec<Action>) {
    if !state.debouncer.fire() {
        return (false, vec![]);
    }

    // The mode may have changed while the timer was pending.
    if state.mode != SearchMode::Direct {
        return (false, vec![]);
    }

    let hits = search::filter(&state.catalog, &state.direct_input);
    state.display_results(hits);
    (true, vec![])
}

fn handle_settings_key(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    match event {
        Event::Char(c) => {
            state.settings_draft.push(*c);
            (true, vec![])
        }
        Event::Backspace => {
            state.settings_draft.pop();
            (true, vec![])
        }
        Event::Submit => {
            let credential = Credential::new(state.settings_draft.as_str());
            tracing::debug!(credential_len = credential.len(), "saving credential");
            state.credential = credential.clone();
            state.close_settings();
            (true, vec![Action::PostToWorker(WorkerMessage::save_credential(credential))])
        }
        Event::Escape => {
            state.close_settings();
            (true, vec![])
        }
        _ => (false, vec![]),
    }
}

fn edit_search_field<F>(state: &mut AppState, edit: F) -> (bool, Vec<Action>)
where
    F: FnOnce(&mut String),
{
    edit(state.active_input_mut());

    match state.mode {
        SearchMode::Direct => {
            let window = state.debouncer.arm();
            (true, vec![Action::StartTimer(window)])
        }
        SearchMode::Description => {
            if state.description_input.trim().is_empty() {
                state.show_full_catalog();
            }
            (true, vec![])
        }
    }
}

fn submit(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.mode != SearchMode::Description {
        return (false, vec![]);
    }

    if state.busy {
        tracing::debug!("search already in flight, ignoring submit");
        return (false, vec![]);
    }

    let description = state.description_input.trim().to_string();
    if description.is_empty() {
        state.show_full_catalog();
        return (true, vec![]);
    }

    let generation = state.generation + 1;
    let request = search::description_request(
        &state.endpoints.completions_url,
        &state.endpoints.model,
        &state.credential,
        &description,
        generation,
    );

    match request {
        Ok(request) => {
            state.generation = generation;
            state.busy = true;
            state.clear_results();
            tracing::debug!(generation, "description search submitted");
            (true, vec![Action::WebRequest(request)])
        }
        Err(e @ FlagFinderError::MissingCredential) => {
            state.show_error(&e);
            state.open_settings();
            (true, vec![])
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to build description request");
            state.show_error(&e);
            (true, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{MISSING_CREDENTIAL_MESSAGE, SEARCH_FAILED_MESSAGE};
    use crate::ui::Theme;
    use crate::{app::state::Results, Config};

    fn loaded_state() -> AppState {
        let mut state = AppState::new(&Config::default(), Theme::default());
        let body = br#"[
            {"name": {"common": "France", "official": "French Republic"}, "cca3": "FRA",
             "region": "Europe", "flags": {"png": "https://flagcdn.com/w320/fr.png", "alt": "Tricolour"}},
            {"name": {"common": "Germany", "official": "Federal Republic of Germany"}, "cca3": "DEU",
             "region": "Europe", "flags": {"png": "https://flagcdn.com/w320/de.png"}}
        ]"#;
        handle_event(
            &mut state,
            &Event::WebResponse {
                kind: RequestKind::Catalog,
                status: 200,
                body: body.to_vec(),
            },
        )
        .unwrap();
        state
    }

    fn message(state: &AppState) -> Option<&str> {
        match &state.results {
            Results::Message(text) => Some(text),
            _ => None,
        }
    }

    #[test]
    fn permission_grant_requests_catalog_once() {
        let mut state = AppState::new(&Config::default(), Theme::default());
        let event = Event::PermissionsResult {
            granted: vec![PermissionType::WebAccess],
        };

        let (_, actions) = handle_event(&mut state, &event).unwrap();
        assert_eq!(actions.len(), 2);
        assert!(matches!(&actions[0], Action::WebRequest(r) if r.kind == RequestKind::Catalog));
        assert!(state.catalog_pending);

        let (_, again) = handle_event(&mut state, &event).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn credential_load_carries_configured_trace_level() {
        let config = Config {
            trace_level: "flagfinder=trace".to_string(),
            ..Config::default()
        };
        let mut state = AppState::new(&config, Theme::default());
        let event = Event::PermissionsResult {
            granted: vec![PermissionType::WebAccess],
        };

        let (_, actions) = handle_event(&mut state, &event).unwrap();
        assert!(matches!(
            &actions[1],
            Action::PostToWorker(message) if message.trace_level() == Some("flagfinder=trace")
        ));
    }

    #[test]
    fn bad_catalog_leaves_catalog_empty() {
        let mut state = AppState::new(&Config::default(), Theme::default());
        handle_event(
            &mut state,
            &Event::WebResponse {
                kind: RequestKind::Catalog,
                status: 200,
                body: b"[{\"name\": 1}]".to_vec(),
            },
        )
        .unwrap();

        assert!(state.catalog.is_empty());
        assert_eq!(message(&state), Some("Failed to load countries data"));
    }

    #[test]
    fn typing_in_description_mode_does_not_search() {
        let mut state = loaded_state();
        let (_, actions) = handle_event(&mut state, &Event::Char('r')).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.description_input, "r");
    }

    #[test]
    fn clearing_description_shows_full_catalog() {
        let mut state = loaded_state();
        state.description_input = "x".to_string();
        state.results = Results::Cleared;

        handle_event(&mut state, &Event::Backspace).unwrap();
        assert_eq!(state.result_countries().len(), 2);
    }

    #[test]
    fn missing_credential_opens_settings_without_request() {
        let mut state = loaded_state();
        state.description_input = "red white blue".to_string();

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(actions.is_empty());
        assert_eq!(message(&state), Some(MISSING_CREDENTIAL_MESSAGE));
        assert_eq!(state.input_mode, InputMode::Settings);
        assert_eq!(state.generation, 0);
    }

    #[test]
    fn settings_keys_edit_the_draft_not_the_search() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::OpenSettings).unwrap();
        for c in " sk-1 ".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        assert!(state.description_input.is_empty());

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert_eq!(state.credential.expose(), "sk-1");
        assert_eq!(state.input_mode, InputMode::Search);
        assert!(matches!(
            &actions[..],
            [Action::PostToWorker(WorkerMessage::SaveCredential { credential, .. })] if credential.expose() == "sk-1"
        ));
    }

    #[test]
    fn escape_in_settings_discards_draft() {
        let mut state = loaded_state();
        state.credential = Credential::new("old");
        handle_event(&mut state, &Event::OpenSettings).unwrap();
        handle_event(&mut state, &Event::Char('x')).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Escape).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.credential.expose(), "old");
    }

    #[test]
    fn escape_outside_settings_hides_plugin() {
        let mut state = loaded_state();
        let (_, actions) = handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(actions, vec![Action::CloseFocus]);
    }

    #[test]
    fn failed_reply_shows_generic_error() {
        let mut state = loaded_state();
        state.credential = Credential::new("sk-1");
        state.description_input = "stripes".to_string();
        handle_event(&mut state, &Event::Submit).unwrap();

        handle_event(
            &mut state,
            &Event::WebResponse {
                kind: RequestKind::Description { generation: 1 },
                status: 500,
                body: vec![],
            },
        )
        .unwrap();

        assert!(!state.busy);
        assert_eq!(message(&state), Some(SEARCH_FAILED_MESSAGE));
    }

    #[test]
    fn credential_loaded_from_worker() {
        let mut state = loaded_state();
        let response = WorkerResponse::CredentialLoaded {
            credential: Some(Credential::new("sk-stored")),
        };
        let (render, _) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        assert!(!render);
        assert_eq!(state.credential.expose(), "sk-stored");
    }
}
