//! Locale-aware ordering of country names.
//!
//! Names are compared on a folded key: transliterated to ASCII with
//! `deunicode` and lowercased, so "Åland Islands" sorts among the A's and
//! "Côte d'Ivoire" next to "Costa Rica". Ties on the folded key fall back to
//! the raw string so the order is total.

use crate::domain::Country;
use deunicode::deunicode;
use std::cmp::Ordering;

/// Folds a name into its collation key.
#[must_use]
pub fn collation_key(name: &str) -> String {
    deunicode(name).to_lowercase()
}

/// Compares two names in ascending locale-aware order.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Sorts countries by common name, ascending. The sort is stable.
pub fn sort_by_common_name(countries: &mut [Country]) {
    countries.sort_by_cached_key(|c| (collation_key(&c.name.common), c.name.common.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accents_sort_with_their_base_letter() {
        let mut names = vec!["Zambia", "Åland Islands", "Albania", "Curaçao", "Côte d'Ivoire", "Cuba"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(
            names,
            vec!["Åland Islands", "Albania", "Côte d'Ivoire", "Cuba", "Curaçao", "Zambia"]
        );
    }

    #[test]
    fn case_does_not_dominate() {
        assert_eq!(compare_names("bhutan", "Brazil"), Ordering::Less);
        assert_eq!(compare_names("Brazil", "bhutan"), Ordering::Greater);
    }

    #[test]
    fn identical_names_are_equal() {
        assert_eq!(compare_names("Chad", "Chad"), Ordering::Equal);
    }

    #[test]
    fn sort_by_common_name_orders_countries() {
        let mut countries = vec![
            Country::new("Germany", "DEU", "Europe"),
            Country::new("Égypt", "EGY", "Africa"),
            Country::new("France", "FRA", "Europe"),
        ];
        sort_by_common_name(&mut countries);
        let codes: Vec<&str> = countries.iter().map(|c| c.cca3.as_str()).collect();
        assert_eq!(codes, vec!["EGY", "FRA", "DEU"]);
    }
}
