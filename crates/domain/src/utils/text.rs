//! Whitespace handling for free-form form input

/// Trim and collapse every run of whitespace into a single space.
///
/// # Examples
///
/// ```
/// use fieldlink_domain::utils::text::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("  Cold \t side\n"), "Cold side");
/// assert_eq!(normalize_whitespace("   "), "");
/// ```
#[must_use]
pub fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// [`normalize_whitespace`] over an optional value; `None` becomes `""`.
#[must_use]
pub fn normalize_opt(value: Option<&str>) -> String {
    value.map(normalize_whitespace).unwrap_or_default()
}

/// `Some(trimmed)` when the value has any non-whitespace content.
#[must_use]
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
