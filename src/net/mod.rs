//! Outbound HTTP request descriptions.
//!
//! The plugin never performs I/O itself. Request builders in [`crate::catalog`]
//! and [`crate::search`] return an [`OutboundRequest`], the event handler wraps
//! it in an action, and the plugin shim hands it to the host's `web_request`.
//! The completion comes back as a separate event carrying the context map
//! produced by [`RequestKind::to_context`], which is how it is routed back to
//! the right pipeline.

use serde::Serialize;
use std::collections::BTreeMap;

const KIND_KEY: &str = "kind";
const GENERATION_KEY: &str = "generation";
const CATALOG_KIND: &str = "catalog";
const DESCRIPTION_KIND: &str = "description";

/// HTTP verb of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Which pipeline issued a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// The one-shot country catalog load.
    Catalog,
    /// A description search, tagged with the search generation that issued it.
    Description {
        /// Generation counter value at submission time.
        generation: u64,
    },
}

impl RequestKind {
    /// Encodes the kind into the string map echoed back by the host.
    #[must_use]
    pub fn to_context(self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        match self {
            Self::Catalog => {
                context.insert(KIND_KEY.to_string(), CATALOG_KIND.to_string());
            }
            Self::Description { generation } => {
                context.insert(KIND_KEY.to_string(), DESCRIPTION_KIND.to_string());
                context.insert(GENERATION_KEY.to_string(), generation.to_string());
            }
        }
        context
    }

    /// Decodes a context map produced by [`Self::to_context`].
    ///
    /// Returns `None` for completions this plugin did not issue.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        match context.get(KIND_KEY).map(String::as_str) {
            Some(CATALOG_KIND) => Some(Self::Catalog),
            Some(DESCRIPTION_KIND) => context
                .get(GENERATION_KEY)
                .and_then(|g| g.parse::<u64>().ok())
                .map(|generation| Self::Description { generation }),
            _ => None,
        }
    }
}

/// A fully described HTTP request, ready to hand to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub kind: RequestKind,
    pub url: String,
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl OutboundRequest {
    /// A body-less GET request.
    pub fn get(kind: RequestKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            method: Method::Get,
            headers: BTreeMap::new(),
            body: Vec::new(),
        }
    }

    /// A POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `payload` cannot be encoded.
    pub fn post_json<T: Serialize>(
        kind: RequestKind,
        url: impl Into<String>,
        payload: &T,
    ) -> serde_json::Result<Self> {
        let body = serde_json::to_vec(payload)?;
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Ok(Self {
            kind,
            url: url.into(),
            method: Method::Post,
            headers,
            body,
        })
    }

    /// Adds a header, replacing any previous value.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Whether an HTTP status is in the 2xx range.
#[must_use]
pub const fn is_success(status: u16) -> bool {
    status >= 200 && status < 300
}
