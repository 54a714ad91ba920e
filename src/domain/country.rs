//! Country domain model.
//!
//! Field names follow the REST Countries v3.1 payload so a catalog response
//! deserializes straight into [`Country`] without an intermediate DTO.

use serde::{Deserialize, Serialize};

/// Common and official names of a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    pub official: String,
}

/// Flag image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagImage {
    /// URL of the PNG rendition.
    pub png: String,
    /// Accessible description of the flag, missing for some entries.
    #[serde(default)]
    pub alt: Option<String>,
}

/// A single country from the catalog.
///
/// Loaded once and never mutated. Identity is the three-letter `cca3` code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: CountryName,
    pub cca3: String,
    pub region: String,
    pub flags: FlagImage,
}

impl Country {
    /// Builds a country with an empty flag reference.
    ///
    /// The official name defaults to the common name.
    ///
    /// ```
    /// use flagfinder::domain::Country;
    ///
    /// let france = Country::new("France", "FRA", "Europe");
    /// assert_eq!(france.name.official, "France");
    /// assert_eq!(france.flag_alt(), "France flag");
    /// ```
    pub fn new(
        common: impl Into<String>,
        cca3: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        let common = common.into();
        Self {
            name: CountryName {
                official: common.clone(),
                common,
            },
            cca3: cca3.into(),
            region: region.into(),
            flags: FlagImage {
                png: String::new(),
                alt: None,
            },
        }
    }

    /// Overrides the official name.
    #[must_use]
    pub fn with_official(mut self, official: impl Into<String>) -> Self {
        self.name.official = official.into();
        self
    }

    /// Alt text for the flag, falling back to `"<common name> flag"`.
    #[must_use]
    pub fn flag_alt(&self) -> String {
        match self.flags.alt.as_deref() {
            Some(alt) if !alt.is_empty() => alt.to_string(),
            _ => format!("{} flag", self.name.common),
        }
    }
}
