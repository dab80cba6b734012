//! OAuth 2.0 client-credentials primitives
//!
//! The token exchange itself lives in `fieldlink-infra`; this module only
//! defines the shapes that cross the crate boundary.

pub mod types;

pub use types::{
    CachedToken, ClientCredentials, TokenResponse, DEFAULT_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS,
    REFRESH_MARGIN_SECS,
};
