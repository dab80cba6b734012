//! Work-order use cases

use std::sync::Arc;

use fieldlink_domain::constants::DEFAULT_CUSTOMER_LABEL;
use fieldlink_domain::utils::json::{first_id, id_string, str_at};
use fieldlink_domain::utils::text::non_empty;
use fieldlink_domain::{
    Brand, CustomerSummary, Enrichment, JobRequest, JobSummary, LocationSummary, Notification,
    NotificationContext, NotificationKind, NotificationLinks, Result, SummaryRequest,
};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::payload::build_job_payload;
use super::ports::Summarizer;
use crate::field_service_ports::FieldServiceClient;
use crate::notification_ports::Notifier;
use crate::utils::best_effort;

/// Everything the caller learns about a created job.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkOrderReceipt {
    pub job_id: Option<Value>,
    pub job_number: Option<Value>,
    pub job_api_url: Option<String>,
    /// An external mail transport accepted the notification.
    pub email_sent: bool,
    pub enrichment: Enrichment,
    /// Raw create-job response.
    pub upstream: Value,
}

/// Work-order service
pub struct WorkOrderService {
    client: Arc<dyn FieldServiceClient>,
    summarizer: Arc<dyn Summarizer>,
    notifier: Arc<dyn Notifier>,
    brand: Brand,
}

impl WorkOrderService {
    /// Create a new work-order service
    pub fn new(
        client: Arc<dyn FieldServiceClient>,
        summarizer: Arc<dyn Summarizer>,
        notifier: Arc<dyn Notifier>,
        brand: Brand,
    ) -> Self {
        Self { client, summarizer, notifier, brand }
    }

    /// Fetch one job; upstream errors propagate unchanged.
    pub async fn get(&self, job_id: &str) -> Result<Value> {
        self.client.get_job(job_id).await
    }

    /// Create a job, enrich it and send the notification.
    ///
    /// Creation is the only hard step. Summarization, the description patch,
    /// the note and the email are best-effort.
    #[instrument(skip(self, request), fields(customer = %request.customer()))]
    pub async fn create(&self, request: &JobRequest) -> Result<WorkOrderReceipt> {
        let payload = build_job_payload(request);
        let created = self.client.create_job(&payload).await?;

        let job_id = first_id(&created, &[&["id"], &["job_id"], &["data", "id"]]);
        let job_number = first_id(&created, &[&["number"], &["data", "number"]]);
        let id_text = job_id.as_ref().and_then(id_string);
        let job_api_url = id_text.as_deref().map(|id| self.client.job_url(id));
        info!(job_id = ?id_text, "job created");

        let enrichment = best_effort(
            "summarize_job",
            self.summarizer.summarize(&summary_request(request)).await,
        )
        .unwrap_or_default();

        if let Some(id) = id_text.as_deref() {
            if !enrichment.is_empty() {
                self.write_back(id, &created, request, &enrichment).await;
            }
        }

        let mut receipt = WorkOrderReceipt {
            job_id,
            job_number,
            job_api_url,
            email_sent: false,
            enrichment,
            upstream: created,
        };

        let notification = self.notification(request, &receipt);
        receipt.email_sent =
            best_effort("notify_job_created", self.notifier.notify(&notification).await)
                .unwrap_or(false);
        if !receipt.email_sent {
            warn!("job notification not delivered externally");
        }

        Ok(receipt)
    }

    /// Append summary links to the job description and as an internal note.
    async fn write_back(
        &self,
        job_id: &str,
        created: &Value,
        request: &JobRequest,
        enrichment: &Enrichment,
    ) {
        let rag = enrichment.rag_url.as_deref();
        let docx = enrichment.links.docx.as_deref();

        let extras: Vec<String> = [rag.map(|r| format!("RAG: {r}")), docx.map(|d| format!("Doc: {d}"))]
            .into_iter()
            .flatten()
            .collect();
        if !extras.is_empty() {
            let current = str_at(created, &["description"]).unwrap_or_else(|| request.problem());
            let description = format!("{current}\n\n{}", extras.join("\n")).trim().to_string();
            best_effort(
                "patch_job_description",
                self.client.patch_job_description(job_id, &description).await,
            );
        }

        let mut note = vec!["Auto-generated summary links:".to_string()];
        note.extend(rag.map(|r| format!("- RAG: {r}")));
        note.extend(docx.map(|d| format!("- DOCX: {d}")));
        best_effort("add_job_note", self.client.add_job_note(job_id, &note.join("\n")).await);
    }

    fn notification(&self, request: &JobRequest, receipt: &WorkOrderReceipt) -> Notification {
        let created = &receipt.upstream;
        let enrichment = &receipt.enrichment;
        let customer = request.customer();
        let category = request.category_label();
        let priority = request.priority_or_default();
        let location = request.location();

        let job = JobSummary {
            id: receipt.job_id.clone(),
            number: receipt.job_number.clone(),
            status: upstream_str(created, "status", None),
            priority: upstream_str(created, "priority", non_empty(request.priority.as_deref())),
            category: upstream_str(created, "category", non_empty(request.category.as_deref())),
            created_at: upstream_str(created, "created_at", None),
            api_url: receipt.job_api_url.clone(),
            description: non_empty(Some(request.problem())).unwrap_or("(empty)").to_string(),
        };

        let context = NotificationContext {
            kind: NotificationKind::JobCreated,
            brand: self.brand.clone(),
            customer: CustomerSummary {
                id: None,
                name: customer.clone(),
                contact: request.contact(),
            },
            job: Some(job),
            location: LocationSummary {
                name: non_empty(location.name.as_deref()).unwrap_or_default().to_string(),
                address: non_empty(location.address.as_deref()).unwrap_or_default().to_string(),
                ..LocationSummary::default()
            },
            links: NotificationLinks {
                docx: enrichment.links.docx.clone(),
                json: enrichment.links.json.clone(),
                rag: enrichment.rag_url.clone(),
            },
        };

        Notification {
            subject: format!("[Work Order] {customer} \u{2014} {category}/{priority}"),
            recipient: request.recipient().map(str::to_string),
            context,
        }
    }
}

/// String field of the create response, else the caller's value.
fn upstream_str(created: &Value, key: &str, fallback: Option<&str>) -> Option<String> {
    str_at(created, &[key]).or(fallback).map(str::to_string)
}

fn summary_request(request: &JobRequest) -> SummaryRequest {
    let customer = request.customer();
    SummaryRequest {
        name: if customer.is_empty() { DEFAULT_CUSTOMER_LABEL.to_string() } else { customer },
        title: format!("{}/{}", request.category_label(), request.priority_or_default()),
        description: request.problem().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use fieldlink_domain::utils::json::safe_get;
    use serde_json::json;

    use super::*;

    #[test]
    fn summary_request_defaults_customer_label() {
        let request: JobRequest = serde_json::from_value(json!({
            "category_ui": "Plumbing",
            "problem_details": " Leak ",
        }))
        .expect("valid");

        let summary = summary_request(&request);

        assert_eq!(summary.name, "Client");
        assert_eq!(summary.title, "Plumbing/Normal");
        assert_eq!(summary.description, "Leak");
    }

    #[test]
    fn nested_data_id_is_found() {
        let created = json!({"data": {"id": 9, "number": "J-9"}});
        assert_eq!(first_id(&created, &[&["id"], &["job_id"], &["data", "id"]]), Some(json!(9)));
        assert_eq!(safe_get(&created, &["data", "number"]), Some(&json!("J-9")));
    }
}
