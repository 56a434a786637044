//! Reusable field filters
//!
//! Filters normalize a raw form value before any validator looks at it.

/// Filter: trim surrounding whitespace
pub fn trim() -> impl Fn(Option<String>) -> Option<String> + Send + Sync + Clone {
    |value: Option<String>| value.map(|s| s.trim().to_string())
}

/// Filter: treat an empty string as a missing field
///
/// Browsers submit empty `<select>` and `<input>` elements as `""`.
pub fn empty_as_missing() -> impl Fn(Option<String>) -> Option<String> + Send + Sync + Clone {
    |value: Option<String>| value.filter(|s| !s.is_empty())
}

/// Run the standard filter chain used by every invoice field
pub fn normalize(field: &str, value: Option<&str>) -> Option<String> {
    let submitted = value.is_some();
    let value = empty_as_missing()(trim()(value.map(str::to_owned)));
    if submitted && value.is_none() {
        tracing::trace!(field, "Blank form value treated as missing");
    }
    value
}
