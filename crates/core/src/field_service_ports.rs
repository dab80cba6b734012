//! Field-service API port
//!
//! Every call goes to the external system of record. Implementations attach
//! authentication, the base URL and the version prefix; callers only deal in
//! JSON bodies and opaque ids.

use async_trait::async_trait;
use fieldlink_domain::Result;
use serde_json::Value;

/// Outcome of the OAuth connectivity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionProbe {
    /// Leading characters of the bearer token, suffixed with `...`.
    pub token_prefix: String,
    /// Status returned by an authenticated `GET /customers`.
    pub ping_status: u16,
}

/// Trait for the external field-service REST API
#[async_trait]
pub trait FieldServiceClient: Send + Sync {
    /// Filtered customer search. Returns the raw response body.
    async fn search_customers(&self, query: &str) -> Result<Value>;

    /// Fetch a customer with contacts and locations expanded
    async fn get_customer(&self, customer_id: &str) -> Result<Value>;

    /// Create a customer record
    async fn create_customer(&self, body: &Value) -> Result<Value>;

    /// Create a service location
    async fn create_location(&self, body: &Value) -> Result<Value>;

    /// Fetch a job with notes and visits expanded
    async fn get_job(&self, job_id: &str) -> Result<Value>;

    /// Create a job from a fully built payload
    async fn create_job(&self, payload: &Value) -> Result<Value>;

    /// Replace a job's description
    async fn patch_job_description(&self, job_id: &str, description: &str) -> Result<Value>;

    /// Append an internal note to a job
    async fn add_job_note(&self, job_id: &str, note: &str) -> Result<Value>;

    /// Canonical API URL of a job resource.
    fn job_url(&self, job_id: &str) -> String;

    /// Obtain a token and make one authenticated request with it.
    async fn probe(&self) -> Result<ConnectionProbe>;
}
