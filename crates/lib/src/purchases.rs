//! # Purchase List Encoding
//!
//! A user's purchases are persisted as a single `previousPurchases` string with
//! tool titles joined by `|`. Titles are kept verbatim: no trimming, no case folding.

/// The separator between titles in a serialized purchase list.
pub const PURCHASE_DELIMITER: char = '|';

/// Splits a serialized purchase list into titles.
///
/// An empty string yields no purchases rather than a single empty title.
pub fn parse_purchases(raw: &str) -> Vec<&str> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(PURCHASE_DELIMITER).collect()
}

/// Joins titles into the persisted `previousPurchases` form.
pub fn join_purchases<S: AsRef<str>>(titles: &[S]) -> String {
    titles
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("|")
}
