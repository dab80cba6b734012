//! Job payload construction
//!
//! Translates an intake [`JobRequest`] into the body the external API
//! accepts: vocabulary mapped, contact details folded into the description,
//! technician assigned, and blank values removed so they never override
//! server-side defaults.

use fieldlink_domain::constants::{
    DEFAULT_JOB_DESCRIPTION, DEFAULT_TECHNICIAN_ID, DEFAULT_TECHNICIAN_LAST_NAME,
    DEFAULT_TECHNICIAN_NAME,
};
use fieldlink_domain::utils::json::drop_empty;
use fieldlink_domain::utils::text::{non_empty, normalize_opt, normalize_whitespace};
use fieldlink_domain::utils::vocabulary::DEFAULT_CATEGORY;
use fieldlink_domain::{map_category, map_status, JobRequest};
use serde_json::{json, Map, Value};
use tracing::debug;

/// Build the create-job body.
///
/// The result never contains `null`, `""` or `"None"` values.
#[must_use]
pub fn build_job_payload(request: &JobRequest) -> Value {
    let location = request.location();

    let category = map_category(request.category.as_deref()).unwrap_or_else(|| {
        debug!(input = ?request.category, default = DEFAULT_CATEGORY, "category not recognised");
        DEFAULT_CATEGORY
    });
    let status = map_status(request.status.as_deref());
    if let Some(input) = non_empty(request.status.as_deref()) {
        if !status.eq_ignore_ascii_case(&normalize_whitespace(input)) {
            debug!(input, mapped = status, "status translated");
        }
    }

    let mut payload = Map::new();
    payload.insert("customer_name".into(), json!(request.customer()));
    payload.insert("location_name".into(), json!(normalize_opt(location.name.as_deref())));
    payload.insert("street_1".into(), json!(normalize_opt(location.address.as_deref())));
    payload.insert("city".into(), json!(normalize_opt(location.city.as_deref())));
    payload.insert("state_prov".into(), json!(normalize_opt(location.state.as_deref())));
    payload.insert("postal_code".into(), json!(normalize_opt(location.zip.as_deref())));
    payload.insert("priority".into(), json!(normalize_whitespace(request.priority_or_default())));
    payload.insert("description".into(), json!(job_description(request)));
    payload.insert("status".into(), json!(status));
    payload.insert("techs_assigned".into(), json!([technician(request.technician.as_deref())]));
    payload.insert("category".into(), json!(category));
    drop_empty(&mut payload);

    Value::Object(payload)
}

/// Problem text followed by a contact line; a fixed placeholder when both
/// are blank.
fn job_description(request: &JobRequest) -> String {
    let lines: Vec<String> = [request.problem().to_string(), request.contact().summary_line()]
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        DEFAULT_JOB_DESCRIPTION.to_string()
    } else {
        lines.join("\n")
    }
}

/// Technician assignment. The name is split on its first space; the id is
/// always the after-hours account.
fn technician(name: Option<&str>) -> Value {
    let name = non_empty(name).map_or_else(
        || DEFAULT_TECHNICIAN_NAME.to_string(),
        normalize_whitespace,
    );
    let (first, last) = name.split_once(' ').unwrap_or((name.as_str(), DEFAULT_TECHNICIAN_LAST_NAME));

    json!({
        "id": DEFAULT_TECHNICIAN_ID,
        "first_name": first,
        "last_name": last,
    })
}
