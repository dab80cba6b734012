//! HTTP routes
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/sf/customers/search?q=` | [`customers::search_customers`] |
//! | GET | `/sf/customers/{id}` | [`customers::get_customer`] |
//! | POST | `/sf/customers` | [`customers::create_customer`] |
//! | POST | `/sf/jobs` | [`jobs::create_job`] |
//! | GET | `/sf/jobs/{id}` | [`jobs::get_job`] |
//! | GET | `/sf/oauth/test` | [`oauth::oauth_test`] |
//! | GET | `/health` | [`health::health_check`] |

use std::sync::Arc;

use axum::body::Bytes;
use axum::routing::{get, post};
use axum::Router;
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;

use crate::errors::{method_not_allowed, ApiError};
use crate::AppContext;

pub mod customers;
pub mod health;
pub mod jobs;
pub mod oauth;

/// Build application router
pub fn build_router(context: Arc<AppContext>) -> Router {
    let sf = Router::new()
        .route("/customers/search", get(customers::search_customers).fallback(method_not_allowed))
        .route("/customers/{id}", get(customers::get_customer).fallback(method_not_allowed))
        .route("/customers", post(customers::create_customer).fallback(method_not_allowed))
        .route("/jobs", post(jobs::create_job).fallback(method_not_allowed))
        .route("/jobs/{id}", get(jobs::get_job).fallback(method_not_allowed))
        .route("/oauth/test", get(oauth::oauth_test).fallback(method_not_allowed));

    Router::new()
        .nest("/sf", sf)
        .merge(health::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(context)
}

/// Decode a request body. An empty body reads as `{}`.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    let raw: &[u8] = if body.iter().all(u8::is_ascii_whitespace) { b"{}" } else { body };
    serde_json::from_slice(raw).map_err(|err| {
        tracing::debug!(error = %err, "rejecting request body");
        ApiError::InvalidJson
    })
}
