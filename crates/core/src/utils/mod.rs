//! Service-level helpers

pub mod best_effort;

pub use best_effort::best_effort;
