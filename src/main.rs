//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the `flagfinder` library and the Zellij
//! plugin API: host events are translated into [`Event`]s, handled by the
//! library, and the resulting [`Action`]s are executed as host calls.
//!
//! ```text
//! ┌──────────────────────────┐
//! │   Zellij plugin thread   │
//! │  ┌───────────────────┐   │
//! │  │  State (plugin)   │   │  ← UI state, web requests, timers
//! │  └───────────────────┘   │
//! │           │ JSON IPC     │
//! │           ▼              │
//! │  ┌───────────────────┐   │
//! │  │ FlagFinderWorker  │   │  ← credential file I/O
//! │  └───────────────────┘   │
//! └──────────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! - `Tab`: switch between description and name search
//! - `Enter`: run a description search (or save, in settings)
//! - `Up`/`Down`, `Ctrl+p`/`Ctrl+n`: move through the results
//! - `Ctrl+e`: open settings
//! - `Esc`: close settings, or hide the plugin
//! - anything printable: type into the active field

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use flagfinder::net::{Method, OutboundRequest, RequestKind};
use flagfinder::worker::{FlagFinderWorker, WorkerMessage, WorkerResponse};
use flagfinder::{handle_event, Action, Config, Event};

register_plugin!(State);
register_worker!(FlagFinderWorker, flagfinder_worker, FLAGFINDER_WORKER);

/// Name shared by the worker registration and its IPC messages.
const WORKER_NAME: &str = "flagfinder";

struct State {
    app: flagfinder::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: flagfinder::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        flagfinder::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        self.app = flagfinder::initialize(&config);
        tracing::debug!(
            countries_url = %config.countries_url,
            debounce_ms = config.debounce.as_millis(),
            "app state initialized"
        );

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match Self::map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Timer,
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                granted: match status {
                    PermissionStatus::Granted => vec![PermissionType::WebAccess],
                    PermissionStatus::Denied => vec![],
                },
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        flagfinder::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                BareKey::Char('e') => Some(Event::OpenSettings),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Tab => Event::SwitchMode,
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::Escape,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    /// Routes a web completion back to the request that issued it.
    fn map_web_result(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(kind) = RequestKind::from_context(context) else {
            tracing::debug!(status, "web result without a known request kind");
            return None;
        };

        tracing::debug!(?kind, status, body_len = body.len(), "web request completed");
        Some(Event::WebResponse { kind, status, body })
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => {
                tracing::debug!(response = ?response, "worker response received");
                Some(Event::WorkerResponse(response))
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => tracing::debug!(error = %e, "failed to serialize worker message"),
        }
    }

    fn send_web_request(request: &OutboundRequest) {
        let verb = match request.method {
            Method::Get => HttpVerb::Get,
            Method::Post => HttpVerb::Post,
        };

        tracing::debug!(
            kind = ?request.kind,
            url = %request.url,
            body_len = request.body.len(),
            "sending web request"
        );

        web_request(
            &request.url,
            verb,
            request.headers.clone(),
            request.body.clone(),
            request.kind.to_context(),
        );
    }

    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::PostToWorker(message) => Self::post_worker_message(message),
            Action::WebRequest(request) => Self::send_web_request(request),
            Action::StartTimer(window) => set_timeout(window.as_secs_f64()),
        }
    }
}
