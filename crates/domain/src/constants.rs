//! Application constants
//!
//! Business defaults applied when a work-order request leaves a field blank.

/// Technician every job is assigned to. The external API only honours the id;
/// the names are informational.
pub const DEFAULT_TECHNICIAN_ID: u64 = 980_629_768;
pub const DEFAULT_TECHNICIAN_NAME: &str = "AnswringAgent AfterHours";
pub const DEFAULT_TECHNICIAN_FIRST_NAME: &str = "AnswringAgent";
pub const DEFAULT_TECHNICIAN_LAST_NAME: &str = "AfterHours";

pub const DEFAULT_PRIORITY: &str = "Normal";
pub const DEFAULT_JOB_DESCRIPTION: &str = "Work order created via integration.";
pub const DEFAULT_CUSTOMER_LABEL: &str = "Client";
pub const DEFAULT_LOCATION_NICKNAME: &str = "Primary";
pub const DEFAULT_BRAND_NAME: &str = "BlueCollar AI";

/// Characters of the bearer token exposed by the OAuth diagnostic.
pub const TOKEN_PREFIX_LEN: usize = 12;

/// Values the external API treats as "not provided". They are stripped from
/// outbound payloads so they never override server-side defaults.
pub const EMPTY_PAYLOAD_SENTINELS: [&str; 2] = ["", "None"];
