//! Small cross-cutting primitives shared across FieldLink crates.
//!
//! - [`time`]: injectable wall/monotonic clock so expiry logic can be tested
//!   without sleeping.
//! - [`auth`]: OAuth client-credentials token types.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;
pub mod time;

pub use auth::{CachedToken, ClientCredentials, TokenResponse};
pub use time::{Clock, MockClock, SystemClock};
