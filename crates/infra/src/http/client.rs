use std::time::Duration;

use fieldlink_domain::config::DEFAULT_HTTP_TIMEOUT_SECS;
use fieldlink_domain::FieldLinkError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;

use crate::errors::InfraError;

/// HTTP client with a fixed per-request timeout.
///
/// A failed call is never retried. Timeouts surface as
/// [`FieldLinkError::UpstreamTimeout`]; everything else goes through the
/// [`InfraError`] conversions.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    timeout: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, FieldLinkError> {
        Self::builder().build()
    }

    /// Configured request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the request once. Any status is returned as `Ok`.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, FieldLinkError> {
        let request = builder.build().map_err(|err| FieldLinkError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, path = url.path(), "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, path = url.path(), status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) if err.is_timeout() => {
                debug!(%method, path = url.path(), "HTTP request timed out");
                Err(FieldLinkError::UpstreamTimeout { timeout_secs: self.timeout.as_secs() })
            }
            Err(err) => {
                debug!(%method, path = url.path(), error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }

    /// Execute the request and decode a JSON body.
    ///
    /// Non-2xx responses become [`FieldLinkError::UpstreamHttp`] carrying the
    /// raw body. An empty 2xx body decodes as `{}`.
    pub async fn send_json(&self, builder: RequestBuilder) -> Result<Value, FieldLinkError> {
        let response = self.send(builder).await?;
        let status = response.status();
        let body = self.read_body(response).await?;

        if !status.is_success() {
            return Err(FieldLinkError::UpstreamHttp { status: status.as_u16(), body });
        }

        if body.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }

        serde_json::from_str(&body).map_err(|err| {
            FieldLinkError::Internal(format!("upstream returned invalid JSON: {err}"))
        })
    }

    /// Read a response body. A timeout while reading is
    /// [`FieldLinkError::UpstreamTimeout`].
    pub async fn read_body(&self, response: Response) -> Result<String, FieldLinkError> {
        response.text().await.map_err(|err| {
            if err.is_timeout() {
                FieldLinkError::UpstreamTimeout { timeout_secs: self.timeout.as_secs() }
            } else {
                InfraError::from(err).into()
            }
        })
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: String,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: concat!("fieldlink/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<HttpClient, FieldLinkError> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .no_proxy()
            .build()
            .map_err(|err| FieldLinkError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, timeout: self.timeout })
    }
}
