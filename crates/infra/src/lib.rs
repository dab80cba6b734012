//! # FieldLink Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The reqwest HTTP client wrapper
//! - The Service Fusion REST client and its client-credentials token cache
//! - The summarization client
//! - SMTP and console mail transports with the fallback chain
//! - Configuration loading (file plus environment)
//!
//! ## Architecture
//! - Implements traits defined in `fieldlink-core`
//! - Depends on `fieldlink-common`, `fieldlink-domain` and `fieldlink-core`
//! - Contains all "impure" code (network, SMTP, filesystem)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod mail;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::service_fusion::{ClientCredentialsAuth, ServiceFusionClient};
pub use integrations::summarizer::SummarizerClient;
pub use mail::FallbackMailer;
