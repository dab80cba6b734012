//! Service Fusion REST integration
//!
//! - **Auth**: [`ClientCredentialsAuth`] caches the client-credentials bearer
//!   token
//! - **Client**: [`ServiceFusionClient`] implements the
//!   `FieldServiceClient` port over the versioned REST API
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use fieldlink_common::time::SystemClock;
//! use fieldlink_domain::ServiceFusionConfig;
//! use fieldlink_infra::integrations::service_fusion::ServiceFusionClient;
//!
//! # fn example() -> fieldlink_domain::Result<()> {
//! let client = ServiceFusionClient::from_config(
//!     &ServiceFusionConfig::default(),
//!     Arc::new(SystemClock),
//! )?;
//! # let _ = client;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;

pub use auth::{AccessTokenProvider, ClientCredentialsAuth};
pub use client::ServiceFusionClient;
