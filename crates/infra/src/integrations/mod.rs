//! External service integrations

pub mod service_fusion;
pub mod summarizer;
