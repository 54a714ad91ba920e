//! JSON file-based storage backend.
//!
//! Credentials live in a small human-readable JSON file. Writes go to a
//! temporary sibling first and are renamed into place, so a crash mid-write
//! never leaves a truncated file behind.

use crate::domain::error::{FlagFinderError, Result};
use crate::storage::backend::CredentialStore;
use crate::storage::models::CredentialRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Credential records keyed by their fixed storage key.
    #[serde(default)]
    credentials: BTreeMap<String, CredentialRecord>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            credentials: BTreeMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// The whole file is held in memory and rewritten on every save. Designed to
/// be owned by the single worker thread.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "credentials": {
///     "countryFinderApiKey": { "value": "sk-...", "saved_at": 1760000000 }
///   }
/// }
/// ```
pub struct JsonStorage {
    file_path: PathBuf,
    data: StorageData,
    dirty: bool,
}

impl JsonStorage {
    /// Creates or opens a JSON storage file.
    ///
    /// Parent directories are created if missing. A missing file starts as
    /// empty storage; nothing is written until the first save.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, or the
    /// file exists but cannot be read or parsed.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no storage file yet, starting empty");
            StorageData::default()
        };

        tracing::debug!(credential_count = data.credentials.len(), "storage initialized");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| FlagFinderError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(version = data.version, "loaded storage data");
        Ok(data)
    }

    /// Writes the in-memory data to disk via temp file + rename.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| FlagFinderError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "storage saved");
        Ok(())
    }
}

impl CredentialStore for JsonStorage {
    fn load_credential(&self, key: &str) -> Result<Option<String>> {
        let _span = tracing::debug_span!("json_load_credential", key = %key).entered();

        let value = self.data.credentials.get(key).map(|record| record.value.clone());

        tracing::debug!(found = value.is_some(), "credential lookup complete");
        Ok(value)
    }

    fn save_credential(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_save_credential",
            key = %key,
            value_len = value.len()
        ).entered();

        self.data
            .credentials
            .insert(key.to_string(), CredentialRecord::new(value));
        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonStorage {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}
