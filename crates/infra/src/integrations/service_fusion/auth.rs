//! Client-credentials token cache
//!
//! One bearer token per client instance, refreshed when it is inside the
//! refresh margin of its expiry. The cache lock is held across the refresh so
//! concurrent callers share a single exchange instead of racing.

use std::sync::Arc;

use async_trait::async_trait;
use fieldlink_common::auth::{CachedToken, ClientCredentials, TokenResponse};
use fieldlink_common::time::Clock;
use fieldlink_domain::{FieldLinkError, Result};
use reqwest::header::ACCEPT;
use reqwest::Method;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::http::HttpClient;

/// Characters of an error body kept in exchange failures.
const ERROR_BODY_LIMIT: usize = 300;

/// Provides OAuth access tokens for the field-service API.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Retrieve a bearer token to authorize API calls.
    async fn access_token(&self) -> Result<String>;
}

/// Token cache backed by the OAuth client-credentials grant.
pub struct ClientCredentialsAuth {
    http_client: HttpClient,
    token_url: String,
    credentials: ClientCredentials,
    clock: Arc<dyn Clock>,
    cache: Mutex<Option<CachedToken>>,
}

impl ClientCredentialsAuth {
    pub fn new(
        token_url: impl Into<String>,
        credentials: ClientCredentials,
        http_client: HttpClient,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            http_client,
            token_url: token_url.into(),
            credentials,
            clock,
            cache: Mutex::new(None),
        }
    }

    /// Pre-populate the cache, e.g. with a token obtained elsewhere.
    pub async fn seed(&self, token: CachedToken) {
        *self.cache.lock().await = Some(token);
    }

    /// Currently cached token, if any.
    pub async fn cached(&self) -> Option<CachedToken> {
        self.cache.lock().await.clone()
    }

    #[instrument(skip(self), fields(token_url = %self.token_url))]
    async fn exchange(&self) -> Result<CachedToken> {
        if !self.credentials.is_complete() {
            return Err(FieldLinkError::AuthConfig(
                "SERVICE_FUSION_CLIENT_ID / SERVICE_FUSION_CLIENT_SECRET are not configured".into(),
            ));
        }

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
        ];
        let request = self
            .http_client
            .request(Method::POST, &self.token_url)
            .header(ACCEPT, "application/json")
            .form(&form);

        let response = self.http_client.send(request).await?;
        let status = response.status();
        let body = self.http_client.read_body(response).await?;

        if status.as_u16() != 200 {
            let excerpt: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            return Err(FieldLinkError::AuthExchange(format!(
                "token endpoint returned {}: {excerpt}",
                status.as_u16()
            )));
        }

        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|err| {
            FieldLinkError::AuthExchange(format!("token response is not JSON: {err}"))
        })?;
        let Some(token) = parsed.token() else {
            return Err(FieldLinkError::AuthExchange("token response without access_token".into()));
        };

        let ttl = parsed.ttl_seconds();
        let cached = CachedToken::issued(token, self.clock.utc_now(), ttl);
        info!(ttl_secs = ttl, token = ?cached, "obtained access token");
        Ok(cached)
    }
}

#[async_trait]
impl AccessTokenProvider for ClientCredentialsAuth {
    async fn access_token(&self) -> Result<String> {
        let mut slot = self.cache.lock().await;

        if let Some(token) = slot.as_ref() {
            if token.is_usable_at(self.clock.utc_now()) {
                return Ok(token.value.clone());
            }
            debug!(expires_at = %token.expires_at, "cached token inside refresh margin");
        }

        let fresh = self.exchange().await?;
        let value = fresh.value.clone();
        *slot = Some(fresh);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use fieldlink_common::time::MockClock;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn auth(server: &MockServer, clock: &MockClock) -> ClientCredentialsAuth {
        ClientCredentialsAuth::new(
            format!("{}/oauth/access_token", server.uri()),
            ClientCredentials::new("client", "secret"),
            HttpClient::new().expect("http client"),
            Arc::new(clock.clone()),
        )
    }

    async fn mount_token(server: &MockServer, token: &str, expires_in: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/oauth/access_token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": token, "expires_in": expires_in})),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn exchanges_client_credentials_as_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/access_token"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=client"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok-1"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let clock = MockClock::new();
        let token = auth(&server, &clock).access_token().await.expect("token");

        assert_eq!(token, "tok-1");
    }

    #[tokio::test]
    async fn token_with_120s_left_is_reused_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(500)).expect(0).mount(&server).await;

        let clock = MockClock::new();
        let auth = auth(&server, &clock);
        auth.seed(CachedToken::issued("cached", clock.utc_now(), 120)).await;

        assert_eq!(auth.access_token().await.expect("token"), "cached");
    }

    #[tokio::test]
    async fn token_with_30s_left_is_refreshed() {
        let server = MockServer::start().await;
        mount_token(&server, "fresh", json!(3600)).await;

        let clock = MockClock::new();
        let auth = auth(&server, &clock);
        auth.seed(CachedToken::issued("stale", clock.utc_now(), 30)).await;

        assert_eq!(auth.access_token().await.expect("token"), "fresh");
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cache_expires_as_the_clock_advances() {
        let server = MockServer::start().await;
        mount_token(&server, "tok", json!("600")).await;

        let clock = MockClock::new();
        let auth = auth(&server, &clock);

        auth.access_token().await.expect("first");
        clock.advance(Duration::from_secs(500));
        auth.access_token().await.expect("still cached");
        assert_eq!(server.received_requests().await.unwrap().len(), 1);

        clock.advance(Duration::from_secs(50));
        auth.access_token().await.expect("refreshed");
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_expires_in_defaults_to_an_hour() {
        let server = MockServer::start().await;
        mount_token(&server, "tok", serde_json::Value::Null).await;

        let clock = MockClock::new();
        let auth = auth(&server, &clock);
        auth.access_token().await.expect("token");

        let cached = auth.cached().await.expect("cached");
        assert_eq!((cached.expires_at - clock.utc_now()).num_seconds(), 3600);
    }

    #[tokio::test]
    async fn oversized_expires_in_defaults_to_an_hour() {
        let server = MockServer::start().await;
        mount_token(&server, "tok", json!(i64::MAX)).await;

        let clock = MockClock::new();
        let auth = auth(&server, &clock);
        assert_eq!(auth.access_token().await.expect("token"), "tok");

        let cached = auth.cached().await.expect("cached");
        assert_eq!((cached.expires_at - clock.utc_now()).num_seconds(), 3600);
    }

    #[tokio::test]
    async fn slow_token_endpoint_is_a_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/access_token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(1500))
                    .set_body_json(json!({"access_token": "tok"})),
            )
            .mount(&server)
            .await;

        let clock = MockClock::new();
        let auth = ClientCredentialsAuth::new(
            format!("{}/oauth/access_token", server.uri()),
            ClientCredentials::new("client", "secret"),
            HttpClient::builder().timeout(Duration::from_secs(1)).build().expect("http client"),
            Arc::new(clock.clone()),
        );

        let err = auth.access_token().await.expect_err("must time out");
        assert!(matches!(err, FieldLinkError::UpstreamTimeout { timeout_secs: 1 }), "{err:?}");
    }

    #[tokio::test]
    async fn missing_credentials_is_a_config_error() {
        let server = MockServer::start().await;
        let auth = ClientCredentialsAuth::new(
            format!("{}/oauth/access_token", server.uri()),
            ClientCredentials::new(" ", "secret"),
            HttpClient::new().expect("http client"),
            Arc::new(MockClock::new()),
        );

        let err = auth.access_token().await.expect_err("should fail");

        assert!(matches!(err, FieldLinkError::AuthConfig(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_200_is_an_exchange_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
            .mount(&server)
            .await;

        let err = auth(&server, &MockClock::new()).access_token().await.expect_err("should fail");

        match err {
            FieldLinkError::AuthExchange(msg) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("invalid_client"));
            }
            other => panic!("expected exchange error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn response_without_token_is_an_exchange_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token_type": "bearer"})))
            .mount(&server)
            .await;

        let err = auth(&server, &MockClock::new()).access_token().await.expect_err("should fail");

        assert!(matches!(err, FieldLinkError::AuthExchange(_)));
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "shared", "expires_in": 3600}))
                    .set_delay(Duration::from_millis(50)),
            )
            .mount(&server)
            .await;

        let auth = Arc::new(auth(&server, &MockClock::new()));
        let handles: Vec<_> = (0..5)
            .map(|_| {
                let auth = auth.clone();
                tokio::spawn(async move { auth.access_token().await })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "shared");
        }

        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }
}
