//! Direct name search.

use crate::catalog::Catalog;
use crate::domain::Country;

/// Filters the catalog by a case-insensitive substring of either name.
///
/// A blank term (after trimming) returns the whole catalog sorted by common
/// name. Otherwise matches keep the catalog's own relative order.
///
/// ```
/// use flagfinder::catalog::Catalog;
/// use flagfinder::domain::Country;
/// use flagfinder::search::filter;
///
/// let catalog = Catalog::from(vec![
///     Country::new("France", "FRA", "Europe"),
///     Country::new("Germany", "DEU", "Europe"),
/// ]);
/// let hits = filter(&catalog, "ger");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].cca3, "DEU");
/// ```
#[must_use]
pub fn filter(catalog: &Catalog, term: &str) -> Vec<Country> {
    let needle = term.trim().to_lowercase();

    let _span = tracing::debug_span!("filter", catalog_len = catalog.len(), term_len = needle.len()).entered();

    if needle.is_empty() {
        return catalog.sorted_by_name();
    }

    let hits: Vec<Country> = catalog
        .countries()
        .iter()
        .filter(|country| matches_name(country, &needle))
        .cloned()
        .collect();

    tracing::debug!(hit_count = hits.len(), "filter applied");
    hits
}

/// Whether either name contains an already-lowercased needle.
fn matches_name(country: &Country, needle: &str) -> bool {
    country.name.common.to_lowercase().contains(needle)
        || country.name.official.to_lowercase().contains(needle)
}

/// Character ranges of `needle` inside `text`, case-insensitively.
///
/// Used to highlight the matched part of a card title. Ranges are
/// `(start, end)` char indices with exclusive end and never overlap.
#[must_use]
pub fn match_ranges(text: &str, needle: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = needle.trim().to_lowercase().chars().collect();
    if needle.is_empty() {
        return vec![];
    }

    // Lowercase per char so indices stay aligned with `text`; a char whose
    // lowercase form expands is compared by its first char.
    let haystack: Vec<char> = text
        .chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect();

    let mut ranges = Vec::new();
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if haystack[i..i + needle.len()] == needle[..] {
            ranges.push((i, i + needle.len()));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}
