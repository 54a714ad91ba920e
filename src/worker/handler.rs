//! Storage worker running on a Zellij worker thread.
//!
//! File I/O for the credential store happens here rather than on the plugin
//! thread. The store is opened lazily on the first message.

use crate::domain::error::{FlagFinderError, Result};
use crate::domain::Credential;
use crate::infrastructure::paths;
use crate::storage::{CredentialStore, JsonStorage, CREDENTIAL_KEY};
use crate::worker::{WorkerMessage, WorkerResponse};
use crate::Config;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
#[derive(Serialize, Deserialize, Default)]
pub struct FlagFinderWorker {
    #[serde(skip)]
    storage: Option<Box<dyn CredentialStore>>,
}

impl FlagFinderWorker {
    /// Creates a worker backed by the JSON store in the plugin data dir.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened.
    pub fn open_default() -> Result<Self> {
        let storage: Box<dyn CredentialStore> = Box::new(JsonStorage::new(paths::credentials_path())?);
        Ok(Self::with_store(storage))
    }

    /// Creates a worker over an already opened store.
    #[must_use]
    pub fn with_store(storage: Box<dyn CredentialStore>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    fn get_storage(&mut self) -> Result<&mut Box<dyn CredentialStore>> {
        self.storage
            .as_mut()
            .ok_or_else(|| FlagFinderError::Worker("Storage not initialized".to_string()))
    }

    /// Maps a storage result onto a response, logging either outcome.
    fn respond<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "storage operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "storage operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_load_credential(&mut self) -> WorkerResponse {
        Self::respond(
            "load credential",
            self.get_storage()
                .and_then(|storage| storage.load_credential(CREDENTIAL_KEY)),
            |value| WorkerResponse::CredentialLoaded {
                credential: value.map(Credential::new),
            },
        )
    }

    fn handle_save_credential(&mut self, credential: &Credential) -> WorkerResponse {
        Self::respond(
            "save credential",
            self.get_storage()
                .and_then(|storage| storage.save_credential(CREDENTIAL_KEY, credential.expose())),
            |()| WorkerResponse::CredentialSaved,
        )
    }

    /// Re-attaches the sender's trace context so worker spans join its trace.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Processes one request and produces its response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _guard = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::LoadCredential { .. } => self.handle_load_credential(),
            WorkerMessage::SaveCredential { credential, .. } => self.handle_save_credential(&credential),
        }
    }
}

static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Tracing config for the worker thread, honoring a level sent by the plugin.
fn tracing_config(first_message: Option<&WorkerMessage>) -> Config {
    let defaults = Config::default();
    Config {
        trace_level: first_message
            .and_then(WorkerMessage::trace_level)
            .map_or(defaults.trace_level.clone(), String::from),
        ..defaults
    }
}

fn reply(name: String, response: &WorkerResponse) {
    match serde_json::to_string(response) {
        Ok(payload) => post_message_to_plugin(PluginMessage {
            name,
            payload,
            worker_name: None,
        }),
        Err(e) => tracing::debug!(error = %e, "failed to serialize worker response"),
    }
}

impl ZellijWorker<'_> for FlagFinderWorker {
    fn on_message(&mut self, message: String, payload: String) {
        let parsed: serde_json::Result<WorkerMessage> = serde_json::from_str(&payload);

        if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
            crate::observability::init_tracing(&tracing_config(parsed.as_ref().ok()));
        }

        if self.storage.is_none() {
            match Self::open_default() {
                Ok(worker) => self.storage = worker.storage,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to initialize storage");
                    reply(
                        message,
                        &WorkerResponse::Error {
                            message: format!("Failed to initialize storage: {e}"),
                        },
                    );
                    return;
                }
            }
        }

        let worker_message = match parsed {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);
        reply(message, &response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        values: HashMap<String, String>,
        fail_writes: bool,
    }

    impl CredentialStore for MemoryStore {
        fn load_credential(&self, key: &str) -> Result<Option<String>> {
            Ok(self.values.get(key).cloned())
        }

        fn save_credential(&mut self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes {
                return Err(FlagFinderError::Storage("disk full".to_string()));
            }
            self.values.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn load_before_any_save_is_none() {
        let mut worker = FlagFinderWorker::with_store(Box::<MemoryStore>::default());
        let response = worker.handle_message(WorkerMessage::load_credential(None));
        assert_eq!(response, WorkerResponse::CredentialLoaded { credential: None });
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut worker = FlagFinderWorker::with_store(Box::<MemoryStore>::default());

        let saved = worker.handle_message(WorkerMessage::save_credential(Credential::new("sk-abc")));
        assert_eq!(saved, WorkerResponse::CredentialSaved);

        let loaded = worker.handle_message(WorkerMessage::load_credential(None));
        assert_eq!(
            loaded,
            WorkerResponse::CredentialLoaded {
                credential: Some(Credential::new("sk-abc"))
            }
        );
    }

    #[test]
    fn storage_failure_becomes_error_response() {
        let store = MemoryStore {
            fail_writes: true,
            ..MemoryStore::default()
        };
        let mut worker = FlagFinderWorker::with_store(Box::new(store));

        let response = worker.handle_message(WorkerMessage::save_credential(Credential::new("sk-abc")));
        assert!(matches!(response, WorkerResponse::Error { ref message } if message.contains("disk full")));
    }

    #[test]
    fn worker_tracing_follows_plugin_level() {
        let load = WorkerMessage::load_credential(Some("debug".to_string()));
        assert_eq!(tracing_config(Some(&load)).trace_level, "debug");

        let save = WorkerMessage::save_credential(Credential::new("sk-abc"));
        assert_eq!(tracing_config(Some(&save)).trace_level, "info");
        assert_eq!(tracing_config(None).trace_level, "info");
    }

    #[test]
    fn uninitialized_worker_reports_error() {
        let mut worker = FlagFinderWorker::default();
        let response = worker.handle_message(WorkerMessage::load_credential(None));
        assert!(matches!(response, WorkerResponse::Error { .. }));
    }
}
