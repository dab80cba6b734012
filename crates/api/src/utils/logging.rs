use std::time::Duration;

use fieldlink_domain::FieldLinkError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable selecting JSON log output.
pub const LOG_FORMAT_ENV: &str = "FIELDLINK_LOG_FORMAT";

/// Install the global tracing subscriber.
///
/// Filtering follows `RUST_LOG` (default `info`). `FIELDLINK_LOG_FORMAT=json`
/// switches to one JSON object per line.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|value| value.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = if json {
        builder.json().with_current_span(false).try_init()
    } else {
        builder.try_init()
    };

    if installed.is_err() {
        warn!("tracing subscriber already installed");
    }
}

/// Log the outcome of a request with structured fields.
///
/// # Parameters
/// * `route` - Logical route identifier (e.g. `"jobs::create"`).
/// * `elapsed` - Duration the handler spent in the service call.
/// * `success` - Whether the primary entity operation succeeded.
///
/// Callers must avoid forwarding sensitive values in `route`.
#[inline]
pub fn log_request_outcome(route: &str, elapsed: Duration, success: bool) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if success {
        info!(route, duration_ms, "request_success");
    } else {
        warn!(route, duration_ms, "request_failure");
    }
}

/// Convert a `FieldLinkError` into a stable label suitable for logging.
#[inline]
#[must_use]
pub const fn error_label(error: &FieldLinkError) -> &'static str {
    match error {
        FieldLinkError::Validation(_) => "validation",
        FieldLinkError::AuthConfig(_) => "auth_config",
        FieldLinkError::AuthExchange(_) => "auth_exchange",
        FieldLinkError::UpstreamHttp { .. } => "upstream_http",
        FieldLinkError::UpstreamTimeout { .. } => "upstream_timeout",
        FieldLinkError::Network(_) => "network",
        FieldLinkError::Config(_) => "config",
        FieldLinkError::Mail(_) => "mail",
        FieldLinkError::Template(_) => "template",
        FieldLinkError::Internal(_) => "internal",
    }
}
