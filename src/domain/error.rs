//! Error types for the flag finder plugin.
//!
//! Every failure in the search pipeline is represented by [`FlagFinderError`].
//! None of these escape the event handler: each one is turned into a message
//! in the results slot via [`FlagFinderError::user_message`].

use thiserror::Error;

/// Message shown when the country catalog could not be loaded.
pub const CATALOG_LOAD_MESSAGE: &str = "Failed to load countries data";

/// Message shown when a description search is attempted without an API key.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "Please add your OpenAI API key in settings first";

/// Message shown when the language-model request or its reply fails.
pub const SEARCH_FAILED_MESSAGE: &str =
    "Error searching flags. Please check your API key and try again.";

/// Message shown when a search completes with zero countries.
pub const NO_MATCHES_MESSAGE: &str = "No matching flags found. Try a different search.";

/// The main error type for flag finder operations.
#[derive(Debug, Error)]
pub enum FlagFinderError {
    /// The country data service could not be reached or returned data that
    /// does not parse into a catalog.
    #[error("Catalog load error: {0}")]
    CatalogLoad(String),

    /// A description search was requested but no API key is stored.
    #[error("No API key configured")]
    MissingCredential,

    /// The language-model endpoint answered with a non-success status.
    #[error("External request failed with status {status}")]
    ExternalRequest {
        /// HTTP status returned by the endpoint.
        status: u16,
    },

    /// The language-model reply was not a JSON array of country codes.
    #[error("Unparsable model reply: {0}")]
    ModelReply(String),

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

impl FlagFinderError {
    /// Returns the text shown to the user in the results slot.
    ///
    /// Network and reply failures collapse into a single "try again"
    /// message; the detailed cause only goes to the trace log.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::CatalogLoad(_) => CATALOG_LOAD_MESSAGE,
            Self::MissingCredential => MISSING_CREDENTIAL_MESSAGE,
            _ => SEARCH_FAILED_MESSAGE,
        }
    }
}

/// A specialized `Result` type for flag finder operations.
pub type Result<T> = std::result::Result<T, FlagFinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_and_reply_failures_share_one_message() {
        let status = FlagFinderError::ExternalRequest { status: 401 };
        let reply = FlagFinderError::ModelReply("expected `[`".to_string());
        assert_eq!(status.user_message(), SEARCH_FAILED_MESSAGE);
        assert_eq!(reply.user_message(), SEARCH_FAILED_MESSAGE);
    }

    #[test]
    fn catalog_and_credential_have_dedicated_messages() {
        assert_eq!(
            FlagFinderError::CatalogLoad("timeout".into()).user_message(),
            CATALOG_LOAD_MESSAGE
        );
        assert_eq!(
            FlagFinderError::MissingCredential.user_message(),
            MISSING_CREDENTIAL_MESSAGE
        );
    }
}
