//! Background worker for credential persistence.
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: worker implementation over a [`CredentialStore`](crate::storage::CredentialStore)

pub mod handler;
pub mod messages;

pub use handler::FlagFinderWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
