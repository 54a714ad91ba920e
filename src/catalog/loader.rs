//! Country catalog loading.
//!
//! The catalog is fetched with a single GET against the configured "all
//! countries" URL. There is no retry: if the response does not turn into a
//! catalog, the caller reports the failure and the catalog stays empty.

use super::{sort_by_common_name, Catalog};
use crate::domain::{Country, FlagFinderError, Result};
use crate::net::{is_success, OutboundRequest, RequestKind};

/// Builds the one-shot catalog request.
#[must_use]
pub fn catalog_request(countries_url: &str) -> OutboundRequest {
    tracing::debug!(url = %countries_url, "building catalog request");
    OutboundRequest::get(RequestKind::Catalog, countries_url)
}

/// Turns a catalog completion into a [`Catalog`].
///
/// # Errors
///
/// Returns [`FlagFinderError::CatalogLoad`] on a non-2xx status or when the
/// body is not an array of well-formed country objects.
pub fn parse_catalog_response(status: u16, body: &[u8]) -> Result<Catalog> {
    let _span = tracing::debug_span!("parse_catalog_response", status, body_len = body.len()).entered();

    if !is_success(status) {
        return Err(FlagFinderError::CatalogLoad(format!(
            "country service answered with status {status}"
        )));
    }

    Catalog::from_json(body)
}

impl Catalog {
    /// Parses a JSON array of countries into a name-sorted catalog.
    ///
    /// The parse is all-or-nothing: one malformed element fails the whole
    /// catalog.
    ///
    /// # Errors
    ///
    /// Returns [`FlagFinderError::CatalogLoad`] describing the parse failure.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let mut countries: Vec<Country> = serde_json::from_slice(body)
            .map_err(|e| FlagFinderError::CatalogLoad(format!("failed to parse countries: {e}")))?;
        sort_by_common_name(&mut countries);

        tracing::debug!(country_count = countries.len(), "catalog parsed");
        Ok(Self::new(countries))
    }
}
