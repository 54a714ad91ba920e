//! Storage record models for the persistence layer.

use serde::{Deserialize, Serialize};

/// A stored credential value with its save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// The credential string, exactly as saved (already trimmed by the caller).
    pub value: String,

    /// Unix timestamp of the last save.
    pub saved_at: i64,
}

impl CredentialRecord {
    /// Creates a record stamped with the current time.
    ///
    /// ```
    /// use flagfinder::storage::CredentialRecord;
    ///
    /// let record = CredentialRecord::new("sk-test");
    /// assert_eq!(record.value, "sk-test");
    /// assert!(record.saved_at > 0);
    /// ```
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            saved_at: chrono::Utc::now().timestamp(),
        }
    }
}
