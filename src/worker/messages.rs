//! Worker thread message types for cross-thread communication.
//!
//! Requests and responses between the plugin and the storage worker travel as
//! JSON strings. Each request carries the sender's trace context so the
//! worker's spans join the same trace.

use crate::domain::Credential;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the current `tracing` span.
    ///
    /// Returns `None` when no valid OpenTelemetry span is active, e.g. when
    /// tracing was never initialized.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_credential(LoadCredential { trace_level: Option<String> }),
    save_credential(SaveCredential { credential: Credential }),
}

/// Messages sent from the plugin to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read the stored API key.
    ///
    /// This is the first message the plugin sends, so it also carries the
    /// configured `trace_level` for the worker's own subscriber.
    LoadCredential {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_level: Option<String>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Persist a new API key, replacing the old one.
    SaveCredential {
        credential: Credential,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context attached to this message, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadCredential { trace_context, .. } | Self::SaveCredential { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

impl WorkerMessage {
    /// Tracing filter requested by the plugin, if this message carries one.
    #[must_use]
    pub fn trace_level(&self) -> Option<&str> {
        match self {
            Self::LoadCredential { trace_level, .. } => trace_level.as_deref(),
            Self::SaveCredential { .. } => None,
        }
    }
}

/// Responses sent from the worker thread back to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The stored API key, or `None` if nothing was ever saved.
    CredentialLoaded { credential: Option<Credential> },

    /// The API key was written to disk.
    CredentialSaved,

    /// A storage operation failed.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_survive_the_json_bridge() {
        let message = WorkerMessage::SaveCredential {
            credential: Credential::new("sk-1"),
            trace_context: None,
        };
        let payload = serde_json::to_string(&message).unwrap();
        assert!(!payload.contains("trace_context"));

        let decoded: WorkerMessage = serde_json::from_str(&payload).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn builders_work_without_active_tracing() {
        let message = WorkerMessage::load_credential(None);
        assert!(message.trace_context().is_none());
    }

    #[test]
    fn trace_level_rides_on_load_requests() {
        let message = WorkerMessage::load_credential(Some("flagfinder=debug".to_string()));
        let payload = serde_json::to_string(&message).unwrap();

        let decoded: WorkerMessage = serde_json::from_str(&payload).unwrap();
        assert_eq!(decoded.trace_level(), Some("flagfinder=debug"));

        let save = WorkerMessage::save_credential(Credential::new("sk-1"));
        assert_eq!(save.trace_level(), None);
    }
}
