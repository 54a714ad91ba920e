//! Country catalog: the canonical in-memory list of countries.
//!
//! The catalog is populated once, when the load completion arrives, sorted by
//! common name, and is read-only afterwards. Every result set the plugin displays is a
//! subsequence of it.
//!
//! - [`loader`]: request construction and response parsing
//! - [`collation`]: locale-aware name ordering

pub mod collation;
pub mod loader;

pub use collation::{compare_names, sort_by_common_name};
pub use loader::{catalog_request, parse_catalog_response};

use crate::domain::Country;

/// Ordered, immutable sequence of countries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    countries: Vec<Country>,
}

impl Catalog {
    /// Wraps a list of countries, keeping the given order.
    #[must_use]
    pub const fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    /// Countries in catalog order.
    #[must_use]
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// The full catalog sorted by common name.
    #[must_use]
    pub fn sorted_by_name(&self) -> Vec<Country> {
        let mut countries = self.countries.clone();
        sort_by_common_name(&mut countries);
        countries
    }

}

impl From<Vec<Country>> for Catalog {
    fn from(countries: Vec<Country>) -> Self {
        Self::new(countries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_view_leaves_catalog_order_untouched() {
        let catalog = Catalog::from(vec![
            Country::new("Germany", "DEU", "Europe"),
            Country::new("France", "FRA", "Europe"),
        ]);

        let sorted = catalog.sorted_by_name();
        assert_eq!(sorted[0].cca3, "FRA");
        assert_eq!(catalog.countries()[0].cca3, "DEU");
    }
}
