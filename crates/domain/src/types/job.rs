//! Work-order intake type

use serde::{Deserialize, Serialize};

use super::customer::{Contact, EmailTarget, ServiceLocation};
use crate::constants::DEFAULT_PRIORITY;
use crate::utils::lenient::opt_string;
use crate::utils::text::{non_empty, normalize_opt};

/// Body of `POST /sf/jobs`.
///
/// Every field is optional; the payload builder fills business defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRequest {
    #[serde(deserialize_with = "opt_string")]
    pub customer_name: Option<String>,
    pub service_location: Option<ServiceLocation>,
    pub contact: Option<Contact>,
    #[serde(deserialize_with = "opt_string")]
    pub category: Option<String>,
    /// Older form builds send the category under this key.
    #[serde(deserialize_with = "opt_string")]
    pub category_ui: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    pub priority: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    pub problem_details: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    pub technician: Option<String>,
    pub email: Option<EmailTarget>,
}

impl JobRequest {
    #[must_use]
    pub fn customer(&self) -> String {
        normalize_opt(self.customer_name.as_deref())
    }

    /// Category exactly as the caller labelled it, `category` first.
    #[must_use]
    pub fn category_label(&self) -> &str {
        non_empty(self.category.as_deref())
            .or_else(|| non_empty(self.category_ui.as_deref()))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn priority_or_default(&self) -> &str {
        non_empty(self.priority.as_deref()).unwrap_or(DEFAULT_PRIORITY)
    }

    /// Problem text, trimmed; empty when missing.
    #[must_use]
    pub fn problem(&self) -> &str {
        self.problem_details.as_deref().map(str::trim).unwrap_or_default()
    }

    #[must_use]
    pub fn location(&self) -> ServiceLocation {
        self.service_location.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn contact(&self) -> Contact {
        self.contact.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn recipient(&self) -> Option<&str> {
        self.email.as_ref().and_then(|e| non_empty(e.to.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn category_ui_is_a_fallback() {
        let request: JobRequest =
            serde_json::from_value(json!({"category_ui": "Plumbing"})).expect("valid");
        assert_eq!(request.category_label(), "Plumbing");

        let both: JobRequest =
            serde_json::from_value(json!({"category": "HVAC", "category_ui": "Plumbing"}))
                .expect("valid");
        assert_eq!(both.category_label(), "HVAC");
    }

    #[test]
    fn priority_defaults_to_normal() {
        assert_eq!(JobRequest::default().priority_or_default(), "Normal");
        let urgent = JobRequest { priority: Some("Urgent".into()), ..JobRequest::default() };
        assert_eq!(urgent.priority_or_default(), "Urgent");
    }

    #[test]
    fn empty_body_deserializes() {
        let request: JobRequest = serde_json::from_value(json!({})).expect("valid");
        assert_eq!(request, JobRequest::default());
    }
}
