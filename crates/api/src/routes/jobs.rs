//! Job endpoints

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use fieldlink_core::WorkOrderReceipt;
use fieldlink_domain::{JobRequest, SummaryLinks};
use serde::Serialize;
use serde_json::Value;

use super::parse_body;
use crate::errors::ApiError;
use crate::utils::logging::log_request_outcome;
use crate::AppContext;

const ERROR_PATH: &str = "jobs";

/// Response of `POST /sf/jobs`.
#[derive(Debug, Serialize)]
pub struct JobCreatedResponse {
    pub ok: bool,
    pub job_id: Option<Value>,
    pub job_number: Option<Value>,
    pub job_api_url: Option<String>,
    /// `"sent"` when an SMTP relay accepted the email, else `"unknown"`.
    pub email_status: &'static str,
    pub links: SummaryLinks,
    pub rag_url: Option<String>,
    pub service_fusion: Value,
}

impl From<WorkOrderReceipt> for JobCreatedResponse {
    fn from(receipt: WorkOrderReceipt) -> Self {
        Self {
            ok: true,
            job_id: receipt.job_id,
            job_number: receipt.job_number,
            job_api_url: receipt.job_api_url,
            email_status: if receipt.email_sent { "sent" } else { "unknown" },
            links: receipt.enrichment.links,
            rag_url: receipt.enrichment.rag_url,
            service_fusion: receipt.upstream,
        }
    }
}

/// POST /sf/jobs
pub async fn create_job(
    State(context): State<Arc<AppContext>>,
    body: Bytes,
) -> Result<Json<JobCreatedResponse>, ApiError> {
    let request: JobRequest = parse_body(&body)?;

    let started = Instant::now();
    let result = context.work_orders.create(&request).await;
    log_request_outcome("jobs::create", started.elapsed(), result.is_ok());

    result.map(|receipt| Json(receipt.into())).map_err(|err| ApiError::from_domain(ERROR_PATH, err))
}

/// GET /sf/jobs/{id}
pub async fn get_job(
    State(context): State<Arc<AppContext>>,
    Path(job_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let started = Instant::now();
    let result = context.work_orders.get(&job_id).await;
    log_request_outcome("jobs::get", started.elapsed(), result.is_ok());

    result.map(Json).map_err(|err| ApiError::from_domain(ERROR_PATH, err))
}
