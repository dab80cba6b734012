//! Shared helpers for `fieldlink-api` integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use fieldlink_api::{build_router, AppContext};
use fieldlink_common::time::SystemClock;
use fieldlink_core::{Notifier, Summarizer};
use fieldlink_domain::{Config, Notification, Result};
use fieldlink_infra::{HttpClient, ServiceFusionClient, SummarizerClient};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Notifier that records notifications instead of sending them.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    delivered: bool,
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn delivering() -> Self {
        Self { delivered: true, ..Self::default() }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &Notification) -> Result<bool> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(self.delivered)
    }
}

/// Router wired to real infrastructure adapters pointed at `server`.
pub struct TestApp {
    pub router: Router,
    pub notifier: RecordingNotifier,
}

pub fn test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.service_fusion.base_url = server.uri();
    config.service_fusion.client_id = "client-id".into();
    config.service_fusion.client_secret = "client-secret".into();
    config.service_fusion.timeout_secs = 5;
    config
}

pub fn build_app(config: Config, notifier: RecordingNotifier) -> TestApp {
    let field_service = Arc::new(
        ServiceFusionClient::from_config(&config.service_fusion, Arc::new(SystemClock))
            .expect("service fusion client"),
    );
    let summarizer: Arc<dyn Summarizer> = Arc::new(SummarizerClient::new(
        &config.summarizer,
        HttpClient::new().expect("http client"),
    ));

    let context =
        AppContext::from_parts(config, field_service, summarizer, Arc::new(notifier.clone()));
    TestApp { router: build_router(Arc::new(context)), notifier }
}

/// Token endpoint answering with a fixed bearer token.
pub async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "sf-test-token-0123456789",
            "expires_in": 3600,
        })))
        .mount(server)
        .await;
}

/// Send a request through the router and decode the JSON response.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .expect("request");

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json response")
    };
    (status, value)
}
