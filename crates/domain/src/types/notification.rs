//! Notification context handed to the email renderer
//!
//! Built once per request, rendered, then dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::customer::Contact;
use crate::impl_domain_status_conversions;

/// Which event the email announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    CustomerCreated,
    JobCreated,
}

impl_domain_status_conversions!(NotificationKind {
    CustomerCreated => "customer_created",
    JobCreated => "job_created",
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub name: String,
    pub contact: Contact,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: Option<Value>,
    pub number: Option<Value>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub created_at: Option<String>,
    pub api_url: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationLinks {
    pub docx: Option<String>,
    pub json: Option<String>,
    pub rag: Option<String>,
}

/// Template data for one notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationContext {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub brand: Brand,
    pub customer: CustomerSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<JobSummary>,
    pub location: LocationSummary,
    pub links: NotificationLinks,
}

/// A rendered-on-send notification: subject, optional explicit recipient and
/// the template context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub subject: String,
    /// Per-request recipient; the configured work-order inbox when `None`.
    pub recipient: Option<String>,
    pub context: NotificationContext,
}
