//! # FieldLink Domain
//!
//! Business domain types for the work-order bridge.
//!
//! This crate contains:
//! - The shared error taxonomy and `Result` alias
//! - Configuration structures
//! - Inbound request and notification types
//! - The category/status vocabulary and its mappers
//!
//! ## Architecture
//! - No dependencies on other FieldLink crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::vocabulary::{map_category, map_status, resolve_category};
