//! Work-order (job) creation and lookup

pub mod payload;
pub mod ports;
pub mod service;

pub use payload::build_job_payload;
pub use ports::Summarizer;
pub use service::{WorkOrderReceipt, WorkOrderService};
