//! Category and status vocabularies accepted by the field-service API
//!
//! The intake form speaks its own labels ("Refrigeration", "new"). The
//! external API only accepts a fixed set of enumerations, so every value is
//! translated here before it leaves the process. Both mappers are total:
//! unknown input never fails, it falls back to a default instead.

use super::text::normalize_whitespace;

/// Categories the external API accepts.
pub const ALLOWED_CATEGORIES: [&str; 10] = [
    "Building Controls",
    "Cold side",
    "Electrical",
    "Hot side",
    "HVAC",
    "Preventative Maintenance Cooking Equipment",
    "Preventative Maintenance HVAC",
    "Preventative Maintenance HVAC-R",
    "Preventative Maintenance Refrigeration",
    "Warranty",
];

/// Intake-form category label to canonical category.
pub const CATEGORY_MAP: [(&str, &str); 5] = [
    ("Refrigeration", "Cold side"),
    ("Plumbing", "Hot side"),
    ("Electrical", "Electrical"),
    ("HVAC", "HVAC"),
    ("General Maintenance", "Warranty"),
];

/// Category used when the input maps to nothing.
pub const DEFAULT_CATEGORY: &str = "Warranty";

/// Statuses the external API accepts.
pub const ALLOWED_STATUSES: [&str; 15] = [
    "Cancelled",
    "Completed",
    "Delayed",
    "Dispatched",
    "Needs Estimate",
    "On Site",
    "On The Way",
    "Partially Completed",
    "Parts Ordered",
    "Paused",
    "Picking up parts",
    "Resumed",
    "Scheduled",
    "Started",
    "Unscheduled",
];

/// Lowercased shorthand to canonical status.
pub const STATUS_ALIASES: [(&str, &str); 10] = [
    ("new", "Unscheduled"),
    ("unschedule", "Unscheduled"),
    ("dispatch", "Dispatched"),
    ("onsite", "On Site"),
    ("on the way", "On The Way"),
    ("started", "Started"),
    ("scheduled", "Scheduled"),
    ("paused", "Paused"),
    ("completed", "Completed"),
    ("cancelled", "Cancelled"),
];

/// Status used when the input matches nothing.
pub const DEFAULT_STATUS: &str = "Unscheduled";

/// Translate an intake category into an allowed category.
///
/// Lookup order: the mapping table, then pass-through when the value is
/// already canonical. Matching is exact after whitespace normalization.
///
/// # Examples
///
/// ```
/// use fieldlink_domain::map_category;
///
/// assert_eq!(map_category(Some("Refrigeration")), Some("Cold side"));
/// assert_eq!(map_category(Some("Hot side")), Some("Hot side"));
/// assert_eq!(map_category(Some("Gardening")), None);
/// ```
#[must_use]
pub fn map_category(ui_value: Option<&str>) -> Option<&'static str> {
    let wanted = normalize_whitespace(ui_value?);
    if wanted.is_empty() {
        return None;
    }

    let mapped = CATEGORY_MAP
        .iter()
        .find(|(label, _)| *label == wanted)
        .map_or(wanted.as_str(), |(_, canonical)| *canonical);

    ALLOWED_CATEGORIES.iter().copied().find(|allowed| *allowed == mapped)
}

/// [`map_category`] with the [`DEFAULT_CATEGORY`] substituted for `None`.
#[must_use]
pub fn resolve_category(ui_value: Option<&str>) -> &'static str {
    map_category(ui_value).unwrap_or(DEFAULT_CATEGORY)
}

/// Translate a free-form status into an allowed status.
///
/// Case- and whitespace-insensitive match against [`ALLOWED_STATUSES`], then
/// [`STATUS_ALIASES`], then [`DEFAULT_STATUS`].
///
/// # Examples
///
/// ```
/// use fieldlink_domain::map_status;
///
/// assert_eq!(map_status(Some("  on   SITE ")), "On Site");
/// assert_eq!(map_status(Some("new")), "Unscheduled");
/// assert_eq!(map_status(None), "Unscheduled");
/// ```
#[must_use]
pub fn map_status(ui_value: Option<&str>) -> &'static str {
    let Some(raw) = ui_value else {
        return DEFAULT_STATUS;
    };
    let wanted = normalize_whitespace(raw).to_lowercase();
    if wanted.is_empty() {
        return DEFAULT_STATUS;
    }

    ALLOWED_STATUSES
        .iter()
        .copied()
        .find(|status| status.to_lowercase() == wanted)
        .or_else(|| {
            STATUS_ALIASES.iter().find(|(alias, _)| *alias == wanted).map(|(_, status)| *status)
        })
        .unwrap_or(DEFAULT_STATUS)
}
