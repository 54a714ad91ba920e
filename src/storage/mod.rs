//! Storage layer for the persisted API key.
//!
//! - `backend`: [`CredentialStore`] trait and the fixed storage key
//! - `json`: JSON file implementation with atomic writes
//! - `models`: on-disk record types

pub mod backend;
pub mod json;
pub mod models;

pub use backend::{CredentialStore, CREDENTIAL_KEY};
pub use json::JsonStorage;
pub use models::CredentialRecord;
