//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for FieldLink
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum FieldLinkError {
    /// Required input is missing or malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Client id/secret are not configured.
    #[error("OAuth configuration error: {0}")]
    AuthConfig(String),

    /// The token endpoint refused us or answered without a token.
    #[error("OAuth token exchange failed: {0}")]
    AuthExchange(String),

    /// The external API answered with a non-2xx status.
    #[error("Upstream HTTP {status}: {body}")]
    UpstreamHttp { status: u16, body: String },

    #[error("Upstream request timed out after {timeout_secs}s")]
    UpstreamTimeout { timeout_secs: u64 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FieldLinkError {
    /// Upstream status code, when the failure came from a non-2xx response.
    #[must_use]
    pub const fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::UpstreamHttp { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Upstream response body, when the failure came from a non-2xx response.
    #[must_use]
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            Self::UpstreamHttp { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// Caller-side mistake rather than an upstream or infrastructure failure.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type alias for FieldLink operations
pub type Result<T> = std::result::Result<T, FieldLinkError>;
