//! OAuth connectivity diagnostic

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

use crate::utils::logging::{error_label, log_request_outcome};
use crate::AppContext;

/// GET /sf/oauth/test
///
/// Fetches a token and pings the customers collection with it. Failures are
/// reported as `400 {ok: false, error}`.
pub async fn oauth_test(State(context): State<Arc<AppContext>>) -> Response {
    let started = Instant::now();
    let result = context.field_service.probe().await;
    log_request_outcome("oauth::test", started.elapsed(), result.is_ok());

    match result {
        Ok(probe) => Json(json!({
            "ok": true,
            "token_prefix": probe.token_prefix,
            "ping_status": probe.ping_status,
        }))
        .into_response(),
        Err(err) => {
            warn!(kind = error_label(&err), error = %err, "OAuth diagnostic failed");
            (StatusCode::BAD_REQUEST, Json(json!({ "ok": false, "error": err.to_string() })))
                .into_response()
        }
    }
}
