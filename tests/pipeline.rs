//! End-to-end scenarios driven through `handle_event`, the way the plugin
//! runtime drives the library.

use flagfinder::app::Results;
use flagfinder::domain::error::{MISSING_CREDENTIAL_MESSAGE, NO_MATCHES_MESSAGE, SEARCH_FAILED_MESSAGE};
use flagfinder::domain::Credential;
use flagfinder::net::{Method, RequestKind};
use flagfinder::storage::JsonStorage;
use flagfinder::worker::{FlagFinderWorker, WorkerMessage, WorkerResponse};
use flagfinder::{handle_event, initialize, Action, AppState, Config, Event, SearchMode};
use zellij_tile::prelude::PermissionType;

const CATALOG: &[u8] = br#"[
    {"name": {"common": "Germany", "official": "Federal Republic of Germany"}, "cca3": "DEU",
     "region": "Europe", "flags": {"png": "https://flagcdn.com/w320/de.png"}},
    {"name": {"common": "France", "official": "French Republic"}, "cca3": "FRA",
     "region": "Europe", "flags": {"png": "https://flagcdn.com/w320/fr.png"}}
]"#;

fn send(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
    handle_event(state, &event).unwrap()
}

fn type_text(state: &mut AppState, text: &str) -> Vec<Action> {
    text.chars().flat_map(|c| send(state, Event::Char(c)).1).collect()
}

fn codes_in(state: &AppState) -> Vec<&str> {
    state.result_countries().iter().map(|c| c.cca3.as_str()).collect()
}

fn message(state: &AppState) -> Option<&str> {
    match &state.results {
        Results::Message(text) => Some(text),
        _ => None,
    }
}

fn completion(content: &str) -> Vec<u8> {
    serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
    .to_string()
    .into_bytes()
}

/// A plugin that has been granted web access and received the catalog.
fn started(mode: SearchMode) -> AppState {
    started_with(mode, CATALOG)
}

fn started_with(mode: SearchMode, catalog: &[u8]) -> AppState {
    let config = Config {
        initial_mode: mode,
        ..Config::default()
    };
    let mut state = initialize(&config);

    let (_, actions) = send(
        &mut state,
        Event::PermissionsResult {
            granted: vec![PermissionType::WebAccess],
        },
    );
    assert!(actions
        .iter()
        .any(|a| matches!(a, Action::WebRequest(r) if r.kind == RequestKind::Catalog)));

    send(
        &mut state,
        Event::WebResponse {
            kind: RequestKind::Catalog,
            status: 200,
            body: catalog.to_vec(),
        },
    );
    state
}

fn with_credential(mut state: AppState) -> AppState {
    send(
        &mut state,
        Event::WorkerResponse(WorkerResponse::CredentialLoaded {
            credential: Some(Credential::new("sk-test")),
        }),
    );
    state
}

/// Submits the current description and returns the generation it was tagged with.
fn submit(state: &mut AppState) -> u64 {
    let (_, actions) = send(state, Event::Submit);
    match actions.as_slice() {
        [Action::WebRequest(request)] => match request.kind {
            RequestKind::Description { generation } => generation,
            RequestKind::Catalog => panic!("expected a description request"),
        },
        other => panic!("expected one web request, got {other:?}"),
    }
}

fn reply(state: &mut AppState, generation: u64, content: &str) -> bool {
    send(
        state,
        Event::WebResponse {
            kind: RequestKind::Description { generation },
            status: 200,
            body: completion(content),
        },
    )
    .0
}

#[test]
fn startup_shows_sorted_catalog() {
    let state = started(SearchMode::Description);
    assert!(!state.catalog_pending);
    assert_eq!(codes_in(&state), ["FRA", "DEU"]);
}

#[test]
fn denied_permission_shows_load_failure() {
    let mut state = initialize(&Config::default());
    let (_, actions) = send(&mut state, Event::PermissionsResult { granted: vec![] });

    assert!(actions.is_empty());
    assert_eq!(message(&state), Some("Failed to load countries data"));
}

#[test]
fn direct_search_filters_after_quiet_window() {
    let mut state = started(SearchMode::Direct);

    let actions = type_text(&mut state, "ger");
    assert_eq!(actions.len(), 3);
    assert!(actions.iter().all(|a| matches!(a, Action::StartTimer(_))));

    // Two earlier timers elapse while a newer one is outstanding.
    assert!(!send(&mut state, Event::Timer).0);
    assert!(!send(&mut state, Event::Timer).0);
    assert_eq!(codes_in(&state), ["FRA", "DEU"]);

    assert!(send(&mut state, Event::Timer).0);
    assert_eq!(codes_in(&state), ["DEU"]);
}

#[test]
fn direct_hits_follow_name_order_not_service_order() {
    let body = br#"[
        {"name": {"common": "Nigeria", "official": "Federal Republic of Nigeria"}, "cca3": "NGA",
         "region": "Africa", "flags": {"png": "https://flagcdn.com/w320/ng.png"}},
        {"name": {"common": "Germany", "official": "Federal Republic of Germany"}, "cca3": "DEU",
         "region": "Europe", "flags": {"png": "https://flagcdn.com/w320/de.png"}},
        {"name": {"common": "Algeria", "official": "People's Democratic Republic of Algeria"}, "cca3": "DZA",
         "region": "Africa", "flags": {"png": "https://flagcdn.com/w320/dz.png"}}
    ]"#;
    let mut state = started_with(SearchMode::Direct, body);

    type_text(&mut state, "ger");
    for _ in 0..3 {
        send(&mut state, Event::Timer);
    }

    assert_eq!(codes_in(&state), ["DZA", "DEU", "NGA"]);
}

#[test]
fn clearing_direct_search_restores_full_catalog() {
    let mut state = started(SearchMode::Direct);
    type_text(&mut state, "ger");
    for _ in 0..3 {
        send(&mut state, Event::Timer);
    }

    for _ in 0..3 {
        send(&mut state, Event::Backspace);
    }
    for _ in 0..3 {
        send(&mut state, Event::Timer);
    }

    assert_eq!(codes_in(&state), ["FRA", "DEU"]);
}

#[test]
fn official_names_match_too() {
    let mut state = started(SearchMode::Direct);
    type_text(&mut state, "REPUBLIC");
    for _ in 0.."REPUBLIC".len() {
        send(&mut state, Event::Timer);
    }
    assert_eq!(codes_in(&state), ["FRA", "DEU"]);

    type_text(&mut state, "zzz");
    for _ in 0..3 {
        send(&mut state, Event::Timer);
    }
    assert_eq!(message(&state), Some(NO_MATCHES_MESSAGE));
}

#[test]
fn description_search_without_credential_prompts_for_settings() {
    let mut state = started(SearchMode::Description);
    type_text(&mut state, "red circle");

    let (_, actions) = send(&mut state, Event::Submit);

    assert!(actions.is_empty());
    assert!(!state.busy);
    assert_eq!(message(&state), Some(MISSING_CREDENTIAL_MESSAGE));
    assert_eq!(state.input_mode, flagfinder::app::InputMode::Settings);
}

#[test]
fn unknown_model_codes_are_dropped() {
    let mut state = with_credential(started(SearchMode::Description));
    type_text(&mut state, "blue white red vertical stripes");

    let (_, actions) = send(&mut state, Event::Submit);
    let [Action::WebRequest(request)] = actions.as_slice() else {
        panic!("expected one web request, got {actions:?}");
    };
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.headers.get("Authorization").map(String::as_str), Some("Bearer sk-test"));
    assert!(state.busy);

    let RequestKind::Description { generation } = request.kind else {
        panic!("expected a description request");
    };
    assert!(reply(&mut state, generation, r#"["FRA","ITA"]"#));

    assert!(!state.busy);
    assert_eq!(codes_in(&state), ["FRA"]);
}

#[test]
fn malformed_model_reply_shows_generic_failure() {
    let mut state = with_credential(started(SearchMode::Description));
    type_text(&mut state, "a maple leaf");
    let generation = submit(&mut state);

    reply(&mut state, generation, "Sure! Here are the codes: FRA");

    assert!(!state.busy);
    assert!(state.result_countries().is_empty());
    assert_eq!(message(&state), Some(SEARCH_FAILED_MESSAGE));
}

#[test]
fn failed_completion_status_shows_generic_failure() {
    let mut state = with_credential(started(SearchMode::Description));
    type_text(&mut state, "a maple leaf");
    let generation = submit(&mut state);

    send(
        &mut state,
        Event::WebResponse {
            kind: RequestKind::Description { generation },
            status: 401,
            body: br#"{"error": {"message": "bad key"}}"#.to_vec(),
        },
    );

    assert_eq!(message(&state), Some(SEARCH_FAILED_MESSAGE));
}

#[test]
fn submit_is_ignored_while_a_search_is_in_flight() {
    let mut state = with_credential(started(SearchMode::Description));
    type_text(&mut state, "tricolour");
    let generation = submit(&mut state);

    let (render, actions) = send(&mut state, Event::Submit);
    assert!(!render);
    assert!(actions.is_empty());
    assert_eq!(state.generation, generation);
}

#[test]
fn stale_reply_is_discarded() {
    let mut state = with_credential(started(SearchMode::Description));
    type_text(&mut state, "tricolour");
    let first = submit(&mut state);
    assert!(reply(&mut state, first, r#"["DEU"]"#));

    type_text(&mut state, " with blue");
    let second = submit(&mut state);
    assert!(second > first);

    // A duplicate of the first completion arrives late.
    assert!(!reply(&mut state, first, r#"["DEU"]"#));
    assert!(state.busy);

    reply(&mut state, second, r#"["FRA"]"#);
    assert_eq!(codes_in(&state), ["FRA"]);
}

#[test]
fn switching_to_an_empty_mode_shows_full_catalog() {
    let mut state = started(SearchMode::Direct);
    type_text(&mut state, "ger");
    for _ in 0..3 {
        send(&mut state, Event::Timer);
    }
    assert_eq!(codes_in(&state), ["DEU"]);

    send(&mut state, Event::SwitchMode);
    assert_eq!(state.mode, SearchMode::Description);
    assert_eq!(codes_in(&state), ["FRA", "DEU"]);
}

#[test]
fn timer_after_mode_switch_does_not_filter() {
    let mut state = started(SearchMode::Direct);
    type_text(&mut state, "f");
    send(&mut state, Event::SwitchMode);

    assert!(!send(&mut state, Event::Timer).0);
    assert_eq!(codes_in(&state), ["FRA", "DEU"]);
}

#[test]
fn saved_key_survives_a_worker_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json");

    let mut state = started(SearchMode::Description);
    send(&mut state, Event::OpenSettings);
    type_text(&mut state, "sk-saved");
    let (_, actions) = send(&mut state, Event::Submit);
    let [Action::PostToWorker(save)] = actions.as_slice() else {
        panic!("expected one worker message, got {actions:?}");
    };

    let mut worker = FlagFinderWorker::with_store(Box::new(JsonStorage::new(path.clone()).unwrap()));
    assert_eq!(worker.handle_message(save.clone()), WorkerResponse::CredentialSaved);
    drop(worker);

    let mut restarted = FlagFinderWorker::with_store(Box::new(JsonStorage::new(path).unwrap()));
    let loaded = restarted.handle_message(WorkerMessage::load_credential(None));

    let mut fresh = started(SearchMode::Description);
    send(&mut fresh, Event::WorkerResponse(loaded));
    assert_eq!(fresh.credential, Credential::new("sk-saved"));
}
