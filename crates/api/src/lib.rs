//! # FieldLink API
//!
//! HTTP application layer - JSON endpoints and main entry point.
//!
//! This crate contains:
//! - axum route handlers (`/sf/*`, `/health`)
//! - Application context (dependency injection)
//! - The error envelope returned on every failure path
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod context;
pub mod errors;
pub mod routes;
pub mod utils;

// Re-export for convenience
pub use context::AppContext;
pub use errors::ApiError;
pub use routes::build_router;
