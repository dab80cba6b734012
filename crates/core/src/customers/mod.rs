//! Customer search, lookup and creation

pub mod service;

pub use service::{CustomerCreation, CustomerService};
