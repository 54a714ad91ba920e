//! The API key used for description searches.

use serde::{Deserialize, Deserializer, Serialize};

/// An opaque API key.
///
/// `Debug` prints only the length so the key never reaches the trace log,
/// even when a containing message or event is logged with `?`.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wraps a key, trimming surrounding whitespace.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    /// The raw key, for building the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// A blank key counts as no key at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'de> Deserialize<'de> for Credential {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential(<{} chars>)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_the_key() {
        let credential = Credential::new("sk-very-secret");
        let printed = format!("{credential:?}");
        assert!(!printed.contains("secret"));
        assert!(printed.contains("14"));
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert!(Credential::new("  \t ").is_empty());
        assert_eq!(Credential::new(" sk-1 ").expose(), "sk-1");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Credential::new("sk-1")).unwrap();
        assert_eq!(json, "\"sk-1\"");
    }

    #[test]
    fn deserializing_trims_like_new() {
        let credential: Credential = serde_json::from_str("\"  sk-1\\n\"").unwrap();
        assert_eq!(credential.expose(), "sk-1");

        let blank: Credential = serde_json::from_str("\"   \"").unwrap();
        assert!(blank.is_empty());
    }
}
