//! Storage backend abstraction.
//!
//! The plugin persists exactly one value: the API key used for description
//! searches. [`CredentialStore`] is the seam the worker talks to, so tests can
//! swap the JSON file for an in-memory map.

use crate::domain::error::Result;

/// Fixed key under which the API key is stored.
pub const CREDENTIAL_KEY: &str = "countryFinderApiKey";

/// Durable key-value storage for credentials.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes
pub trait CredentialStore: Send {
    /// Reads the credential stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing was ever saved under that key.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn load_credential(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be made durable.
    fn save_credential(&mut self, key: &str, value: &str) -> Result<()>;
}
