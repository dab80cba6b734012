/// Client for the external summarization service
use async_trait::async_trait;
use fieldlink_core::Summarizer;
use fieldlink_domain::utils::text::non_empty;
use fieldlink_domain::{Enrichment, Result, SummarizerConfig, SummaryRequest};
use reqwest::header::ACCEPT;
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::http::HttpClient;

const API_KEY_HEADER: &str = "x-api-key";
const DEFAULT_TITLE: &str = "Note";

/// Summarization client. Unconfigured clients return an empty enrichment.
pub struct SummarizerClient {
    http_client: HttpClient,
    api_url: Option<String>,
    api_key: Option<String>,
}

impl SummarizerClient {
    pub fn new(config: &SummarizerConfig, http_client: HttpClient) -> Self {
        Self {
            http_client,
            api_url: config.endpoint().map(str::to_string),
            api_key: config.api_key.as_deref().and_then(|k| non_empty(Some(k))).map(str::to_string),
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_url.is_some()
    }
}

#[async_trait]
impl Summarizer for SummarizerClient {
    #[instrument(skip(self, request), fields(title = %request.title))]
    async fn summarize(&self, request: &SummaryRequest) -> Result<Enrichment> {
        let Some(api_url) = self.api_url.as_deref() else {
            debug!("summarizer not configured, skipping");
            return Ok(Enrichment::default());
        };

        let title = non_empty(Some(&request.title)).unwrap_or(DEFAULT_TITLE);
        let body = json!({
            "name": request.name,
            "title": title,
            "description": request.description,
        });

        let mut builder = self
            .http_client
            .request(Method::POST, api_url)
            .header(ACCEPT, "application/json")
            .json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }

        let raw = self.http_client.send_json(builder).await?;
        let enrichment = Enrichment::from_response(raw);
        info!(has_links = !enrichment.is_empty(), "summary generated");
        Ok(enrichment)
    }
}
