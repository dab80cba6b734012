//! Document summarization endpoint
//!
//! Optional: with no endpoint configured every call yields an empty
//! [`fieldlink_domain::Enrichment`] without touching the network.

pub mod client;

pub use client::SummarizerClient;
