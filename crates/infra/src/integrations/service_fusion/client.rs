/// Service Fusion REST client for customers, locations and jobs
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fieldlink_common::time::Clock;
use fieldlink_core::{ConnectionProbe, FieldServiceClient};
use fieldlink_domain::constants::TOKEN_PREFIX_LEN;
use fieldlink_domain::{Result, ServiceFusionConfig};
use reqwest::header::ACCEPT;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use super::auth::{AccessTokenProvider, ClientCredentialsAuth};
use crate::http::HttpClient;

const CUSTOMER_EXPAND: &str = "contacts,contacts.phones,contacts.emails,locations";
const CUSTOMER_SEARCH_FIELDS: &str = "id,customer_name,contacts,locations";
const CUSTOMER_SEARCH_PAGE_SIZE: &str = "25";
const JOB_EXPAND: &str = "notes,visits";
const JOB_CREATE_FIELDS: &str =
    "id,number,status,customer_name,description,priority,created_at,location_name,category";
const JOB_CREATE_EXPAND: &str = "notes";

/// Service Fusion REST client
pub struct ServiceFusionClient {
    api_root: String,
    http_client: HttpClient,
    access_token_provider: Arc<dyn AccessTokenProvider>,
}

impl ServiceFusionClient {
    /// Create a client against `api_root` (base URL plus version prefix).
    pub fn new(
        api_root: impl Into<String>,
        http_client: HttpClient,
        access_token_provider: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self {
            api_root: api_root.into().trim_end_matches('/').to_string(),
            http_client,
            access_token_provider,
        }
    }

    /// Build the client and its token cache from configuration.
    pub fn from_config(config: &ServiceFusionConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let http_client =
            HttpClient::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        let auth = ClientCredentialsAuth::new(
            config.token_endpoint(),
            fieldlink_common::ClientCredentials::new(&config.client_id, &config.client_secret),
            http_client.clone(),
            clock,
        );

        Ok(Self::new(config.api_root(), http_client, Arc::new(auth)))
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.api_root)
        } else {
            format!("{}/{path}", self.api_root)
        }
    }

    /// Authenticated JSON call. Non-2xx responses fail with the upstream
    /// status and body; an empty body yields `{}`.
    #[instrument(skip(self, query, body), fields(%method))]
    async fn call(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let token = self.access_token_provider.access_token().await?;

        let mut request = self
            .http_client
            .request(method, self.url(path))
            .bearer_auth(token)
            .header(ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let value = self.http_client.send_json(request).await?;
        debug!(path, "Service Fusion call succeeded");
        Ok(value)
    }

    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        self.call(Method::GET, path, query, None).await
    }

    pub async fn post(&self, path: &str, body: &Value, query: &[(&str, &str)]) -> Result<Value> {
        self.call(Method::POST, path, query, Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> Result<Value> {
        self.call(Method::PATCH, path, &[], Some(body)).await
    }
}

#[async_trait]
impl FieldServiceClient for ServiceFusionClient {
    async fn search_customers(&self, query: &str) -> Result<Value> {
        self.get(
            "/customers",
            &[
                ("filters[name]", query),
                ("expand", CUSTOMER_EXPAND),
                ("per-page", CUSTOMER_SEARCH_PAGE_SIZE),
                ("fields", CUSTOMER_SEARCH_FIELDS),
            ],
        )
        .await
    }

    async fn get_customer(&self, customer_id: &str) -> Result<Value> {
        self.get(&format!("/customers/{customer_id}"), &[("expand", CUSTOMER_EXPAND)]).await
    }

    async fn create_customer(&self, body: &Value) -> Result<Value> {
        self.post("/customers", body, &[]).await
    }

    async fn create_location(&self, body: &Value) -> Result<Value> {
        self.post("/locations", body, &[]).await
    }

    async fn get_job(&self, job_id: &str) -> Result<Value> {
        self.get(&format!("/jobs/{job_id}"), &[("expand", JOB_EXPAND)]).await
    }

    async fn create_job(&self, payload: &Value) -> Result<Value> {
        self.post(
            "/jobs",
            payload,
            &[("fields", JOB_CREATE_FIELDS), ("expand", JOB_CREATE_EXPAND)],
        )
        .await
    }

    async fn patch_job_description(&self, job_id: &str, description: &str) -> Result<Value> {
        self.patch(&format!("/jobs/{job_id}"), &json!({ "description": description })).await
    }

    async fn add_job_note(&self, job_id: &str, note: &str) -> Result<Value> {
        self.post(
            &format!("/jobs/{job_id}/notes"),
            &json!({ "note": note, "visibility": "internal" }),
            &[],
        )
        .await
    }

    fn job_url(&self, job_id: &str) -> String {
        self.url(&format!("/jobs/{job_id}"))
    }

    async fn probe(&self) -> Result<ConnectionProbe> {
        let token = self.access_token_provider.access_token().await?;
        let request = self
            .http_client
            .request(Method::GET, self.url("/customers"))
            .bearer_auth(&token)
            .header(ACCEPT, "application/json");
        let response = self.http_client.send(request).await?;

        let head: String = token.chars().take(TOKEN_PREFIX_LEN).collect();
        Ok(ConnectionProbe { token_prefix: format!("{head}..."), ping_status: response.status().as_u16() })
    }
}
