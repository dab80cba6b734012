//! # FieldLink Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the field-service API, the summarizer and
//!   the notifier
//! - The job payload builder
//! - Customer and work-order use cases, including best-effort side effects
//!
//! ## Architecture Principles
//! - Only depends on `fieldlink-domain`
//! - No HTTP, SMTP or filesystem code
//! - All external dependencies via traits

pub mod customers;
pub mod utils;
pub mod work_orders;

// Infrastructure ports
pub mod field_service_ports;
pub mod notification_ports;

pub use customers::{CustomerCreation, CustomerService};
pub use field_service_ports::{ConnectionProbe, FieldServiceClient};
pub use notification_ports::Notifier;
pub use work_orders::{build_job_payload, Summarizer, WorkOrderReceipt, WorkOrderService};
