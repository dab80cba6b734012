//! Customer use cases

use std::sync::Arc;

use fieldlink_domain::constants::DEFAULT_LOCATION_NICKNAME;
use fieldlink_domain::utils::json::{drop_empty, first_id, id_string, str_at};
use fieldlink_domain::utils::text::{non_empty, normalize_opt};
use fieldlink_domain::{
    Brand, CustomerSummary, FieldLinkError, LocationSummary, NewCustomerRequest, Notification,
    NotificationContext, NotificationKind, NotificationLinks, Result, ServiceLocation,
};
use serde_json::{json, Map, Value};
use tracing::{debug, info, instrument};

use crate::field_service_ports::FieldServiceClient;
use crate::notification_ports::Notifier;
use crate::utils::best_effort;

/// Result of a create call that reached the external API.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomerCreation {
    /// Created; carries the re-fetched record (or a minimal stand-in).
    Created(Value),
    /// The API answered 2xx but the body held no usable id.
    MissingId { raw: Value },
}

/// Customer service
pub struct CustomerService {
    client: Arc<dyn FieldServiceClient>,
    notifier: Arc<dyn Notifier>,
    brand: Brand,
}

impl CustomerService {
    /// Create a new customer service
    pub fn new(
        client: Arc<dyn FieldServiceClient>,
        notifier: Arc<dyn Notifier>,
        brand: Brand,
    ) -> Self {
        Self { client, notifier, brand }
    }

    /// Search customers by name.
    ///
    /// An empty query returns no results without calling the API. Each item
    /// gains a `name` key mirroring `customer_name` when it has none.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Value>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let response = self.client.search_customers(query).await?;
        let Some(items) = response.get("items").and_then(Value::as_array) else {
            debug!("customer search response has no item list");
            return Ok(Vec::new());
        };

        Ok(items.iter().cloned().map(with_name_alias).collect())
    }

    /// Fetch one customer; upstream errors propagate unchanged.
    pub async fn get(&self, customer_id: &str) -> Result<Value> {
        self.client.get_customer(customer_id).await
    }

    /// Create a customer, then attach its location, re-fetch it and notify.
    ///
    /// Only the create call can fail the operation. The location attach,
    /// re-fetch and notification are best-effort.
    ///
    /// # Errors
    /// `Validation` when the name is blank; any error from the create call.
    #[instrument(skip(self, request), fields(customer = %request.name()))]
    pub async fn create(&self, request: &NewCustomerRequest) -> Result<CustomerCreation> {
        let name = request.name();
        if name.is_empty() {
            return Err(FieldLinkError::Validation("customer_name is required".into()));
        }

        let created = self.client.create_customer(&json!({ "customer_name": name })).await?;
        let Some(customer_id) = first_id(&created, &[&["id"], &["customer_id"]]) else {
            return Ok(CustomerCreation::MissingId { raw: created });
        };
        let id_text = id_string(&customer_id).unwrap_or_default();
        info!(customer_id = %id_text, "customer created");

        if let Some(location) = request.location() {
            let body = location_body(&customer_id, location);
            best_effort("attach_location", self.client.create_location(&body).await);
        }

        let full = best_effort("refetch_customer", self.client.get_customer(&id_text).await)
            .unwrap_or_else(|| json!({ "id": customer_id, "customer_name": name }));

        let notification = self.notification(request, &full, &name);
        best_effort("notify_customer_created", self.notifier.notify(&notification).await);

        Ok(CustomerCreation::Created(full))
    }

    fn notification(&self, request: &NewCustomerRequest, full: &Value, name: &str) -> Notification {
        let location = request.service_location.clone().unwrap_or_default();
        let context = NotificationContext {
            kind: NotificationKind::CustomerCreated,
            brand: self.brand.clone(),
            customer: CustomerSummary {
                id: full.get("id").cloned().filter(|v| !v.is_null()),
                name: str_at(full, &["customer_name"]).unwrap_or(name).to_string(),
                contact: request.contact.clone().unwrap_or_default(),
            },
            job: None,
            location: LocationSummary {
                name: trimmed(location.name.as_deref()),
                address: location.street(),
                city: trimmed(location.city.as_deref()),
                state: trimmed(location.state.as_deref()),
                zip: trimmed(location.zip.as_deref()),
            },
            links: NotificationLinks::default(),
        };

        Notification {
            subject: format!("[Customer Created] {name}"),
            recipient: request.recipient().map(str::to_string),
            context,
        }
    }
}

fn trimmed(value: Option<&str>) -> String {
    non_empty(value).unwrap_or_default().to_string()
}

fn with_name_alias(mut item: Value) -> Value {
    if let Some(obj) = item.as_object_mut() {
        if !obj.contains_key("name") {
            if let Some(name) = obj.get("customer_name").cloned() {
                obj.insert("name".into(), name);
            }
        }
    }
    item
}

/// Primary billing location body for a freshly created customer.
fn location_body(customer_id: &Value, location: &ServiceLocation) -> Value {
    let nickname = non_empty(location.name.as_deref()).unwrap_or(DEFAULT_LOCATION_NICKNAME);

    let mut body = Map::new();
    body.insert("customer_id".into(), customer_id.clone());
    body.insert("nickname".into(), json!(normalize_opt(Some(nickname))));
    body.insert("street_1".into(), json!(location.street()));
    body.insert("city".into(), json!(normalize_opt(location.city.as_deref())));
    body.insert("state_prov".into(), json!(normalize_opt(location.state.as_deref())));
    body.insert("postal_code".into(), json!(normalize_opt(location.zip.as_deref())));
    body.insert("is_primary".into(), json!(true));
    body.insert("is_bill_to".into(), json!(true));
    drop_empty(&mut body);

    Value::Object(body)
}
