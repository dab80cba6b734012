//! Request, enrichment and notification types

pub mod customer;
pub mod enrichment;
pub mod job;
pub mod notification;

pub use customer::{Contact, EmailTarget, NewCustomerRequest, ServiceLocation};
pub use enrichment::{Enrichment, SummaryLinks, SummaryRequest};
pub use job::JobRequest;
pub use notification::{
    Brand, CustomerSummary, JobSummary, LocationSummary, Notification, NotificationContext,
    NotificationKind, NotificationLinks,
};
