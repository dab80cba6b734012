//! HTTP error envelope

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fieldlink_domain::FieldLinkError;
use serde_json::{json, Map, Value};
use tracing::error;

use crate::utils::logging::error_label;

const UPSTREAM_ERROR: &str = "Service Fusion error";

/// Failure of an HTTP handler.
#[derive(Debug)]
pub enum ApiError {
    /// Body was not a JSON object of the expected shape.
    InvalidJson,
    /// Required input missing.
    Validation(String),
    /// The create call answered without an id.
    CreateCustomerFailed { raw: Value },
    /// Anything that went wrong talking to the external API.
    Upstream { path: &'static str, source: FieldLinkError },
}

impl ApiError {
    /// Classify a domain error raised while serving `path`.
    #[must_use]
    pub fn from_domain(path: &'static str, err: FieldLinkError) -> Self {
        match err {
            FieldLinkError::Validation(message) => Self::Validation(message),
            source => Self::Upstream { path, source },
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::CreateCustomerFailed { .. } | Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn body(&self) -> Value {
        match self {
            Self::InvalidJson => json!({ "error": "Invalid JSON" }),
            Self::Validation(message) => json!({ "error": message }),
            Self::CreateCustomerFailed { raw } => {
                json!({ "error": "Create customer failed", "raw": raw })
            }
            Self::Upstream { path, source } => upstream_envelope(path, source),
        }
    }
}

/// `{error, path, message, status_code?, response?}`.
fn upstream_envelope(path: &str, source: &FieldLinkError) -> Value {
    let mut detail = Map::new();
    detail.insert("error".into(), json!(UPSTREAM_ERROR));
    detail.insert("path".into(), json!(path));
    detail.insert("message".into(), json!(source.to_string()));

    if let Some(status) = source.upstream_status() {
        detail.insert("status_code".into(), json!(status));
        detail.insert("response".into(), upstream_response(source.upstream_body().unwrap_or("")));
    }

    Value::Object(detail)
}

/// Upstream body as JSON. A list of error objects collapses into their
/// messages joined with `" | "`; non-JSON bodies are returned as text.
#[must_use]
pub fn upstream_response(body: &str) -> Value {
    let Ok(parsed) = serde_json::from_str::<Value>(body) else {
        return Value::String(body.to_string());
    };

    let joined = parsed.as_array().and_then(|items| {
        let messages: Vec<&str> = items
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|item| {
                ["message", "error_description", "error"].iter().find_map(|key| {
                    item.get(*key).and_then(Value::as_str).filter(|text| !text.is_empty())
                })
            })
            .collect();
        (!messages.is_empty()).then(|| messages.join(" | "))
    });

    joined.map_or(parsed, Value::String)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.body();

        if let Self::Upstream { path, source } = &self {
            error!(path, kind = error_label(source), detail = %body, "upstream request failed");
        }

        (status, Json(body)).into_response()
    }
}

/// 405 for a known path hit with the wrong method.
pub async fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, Json(json!({ "error": "Method not allowed" }))).into_response()
}
