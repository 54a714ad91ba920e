//! Domain layer for the flag finder plugin.
//!
//! Holds the country model and the error type. Nothing in here knows about
//! Zellij, HTTP, or rendering.
//!
//! - [`error`]: Error types, result alias and user-facing messages
//! - [`country`]: Country record as delivered by the country data service
//! - [`credential`]: Opaque API key with a redacting `Debug`

pub mod country;
pub mod credential;
pub mod error;

pub use country::{Country, CountryName, FlagImage};
pub use credential::Credential;
pub use error::{FlagFinderError, Result};
