//! Customer-side intake types

use serde::{Deserialize, Serialize};

use crate::utils::lenient::opt_string;
use crate::utils::text::{non_empty, normalize_opt};

/// Service address as entered on the intake form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceLocation {
    #[serde(deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub street_1: Option<String>,
    #[serde(deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

impl ServiceLocation {
    /// No field carries any text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.address, &self.street_1, &self.city, &self.state, &self.zip]
            .iter()
            .all(|field| non_empty(field.as_deref()).is_none())
    }

    /// Street line, preferring `address` over `street_1`.
    #[must_use]
    pub fn street(&self) -> String {
        non_empty(self.address.as_deref())
            .or_else(|| non_empty(self.street_1.as_deref()))
            .map(|s| normalize_opt(Some(s)))
            .unwrap_or_default()
    }
}

/// Point of contact for the visit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Contact {
    /// `Contact: n | Phone: p | Email: e`, skipping blank parts. Empty when
    /// every part is blank.
    #[must_use]
    pub fn summary_line(&self) -> String {
        [
            ("Contact", &self.name),
            ("Phone", &self.phone),
            ("Email", &self.email),
        ]
        .iter()
        .filter_map(|(label, value)| {
            let value = normalize_opt(value.as_deref());
            (!value.is_empty()).then(|| format!("{label}: {value}"))
        })
        .collect::<Vec<_>>()
        .join(" | ")
    }
}

/// Notification routing supplied with a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailTarget {
    #[serde(deserialize_with = "opt_string")]
    pub to: Option<String>,
}

/// Body of `POST /sf/customers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewCustomerRequest {
    #[serde(deserialize_with = "opt_string")]
    pub customer_name: Option<String>,
    pub service_location: Option<ServiceLocation>,
    pub contact: Option<Contact>,
    pub email: Option<EmailTarget>,
}

impl NewCustomerRequest {
    /// Whitespace-normalized customer name; empty when missing.
    #[must_use]
    pub fn name(&self) -> String {
        normalize_opt(self.customer_name.as_deref())
    }

    /// The location, when one with any content was supplied.
    #[must_use]
    pub fn location(&self) -> Option<&ServiceLocation> {
        self.service_location.as_ref().filter(|loc| !loc.is_empty())
    }

    #[must_use]
    pub fn recipient(&self) -> Option<&str> {
        self.email.as_ref().and_then(|e| non_empty(e.to.as_deref()))
    }
}
