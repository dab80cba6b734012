//! OAuth 2.0 client-credentials types
//!
//! Only the pieces the client-credentials grant needs: the id/secret pair, the
//! token endpoint response, and the single cached bearer token.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifetime assumed when the token endpoint omits or garbles `expires_in`.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// A cached token is only handed out while it has more than this many seconds
/// left.
pub const REFRESH_MARGIN_SECS: i64 = 60;

/// Largest `expires_in` accepted from the token endpoint.
pub const MAX_TOKEN_TTL_SECS: i64 = u32::MAX as i64;

/// Client id/secret pair for the client-credentials grant.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ClientCredentials {
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
}

impl ClientCredentials {
    /// Build credentials, trimming surrounding whitespace.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into().trim().to_string(),
            client_secret: client_secret.into().trim().to_string(),
        }
    }

    /// Both halves are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Token endpoint response.
///
/// Both fields are optional on the wire: a missing `access_token` is an
/// exchange failure, a missing or non-numeric `expires_in` falls back to
/// [`DEFAULT_TOKEN_TTL_SECS`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<Value>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl TokenResponse {
    /// Token lifetime in seconds. Accepts integers and numeric strings.
    ///
    /// Values outside `1..=u32::MAX` are treated as malformed.
    #[must_use]
    pub fn ttl_seconds(&self) -> i64 {
        let parsed = match &self.expires_in {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };
        parsed
            .filter(|ttl| (1..=MAX_TOKEN_TTL_SECS).contains(ttl))
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS)
    }

    /// The access token, if it is present and non-empty.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// The single process-wide bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Token issued at `issued_at` that lives for `ttl_seconds`.
    ///
    /// A lifetime that does not fit the calendar falls back to
    /// [`DEFAULT_TOKEN_TTL_SECS`].
    #[must_use]
    pub fn issued(value: impl Into<String>, issued_at: DateTime<Utc>, ttl_seconds: i64) -> Self {
        let expires_at = Duration::try_seconds(ttl_seconds)
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .or_else(|| {
                Duration::try_seconds(DEFAULT_TOKEN_TTL_SECS)
                    .and_then(|ttl| issued_at.checked_add_signed(ttl))
            })
            .unwrap_or(issued_at);
        Self { value: value.into(), expires_at }
    }

    /// `now + REFRESH_MARGIN_SECS < expires_at`.
    #[must_use]
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }

    /// First `len` characters followed by `...`, for diagnostics.
    #[must_use]
    pub fn prefix(&self, len: usize) -> String {
        let head: String = self.value.chars().take(len).collect();
        format!("{head}...")
    }
}

impl fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedToken")
            .field("value", &self.prefix(6))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
