//! Explicit discard of secondary-step failures
//!
//! Location attach, description patch, note append, summarization and email
//! all return `Result`. The orchestrator passes each through [`best_effort`],
//! which logs the failure and turns it into `None`, so ignoring an error is
//! always a visible, logged decision.

use fieldlink_domain::Result;
use tracing::warn;

/// Keep the value on success; log and drop the error otherwise.
///
/// # Examples
///
/// ```
/// use fieldlink_core::utils::best_effort;
/// use fieldlink_domain::FieldLinkError;
///
/// assert_eq!(best_effort("noop", Ok::<_, FieldLinkError>(3)), Some(3));
/// assert_eq!(best_effort::<u8>("noop", Err(FieldLinkError::Network("down".into()))), None);
/// ```
pub fn best_effort<T>(step: &'static str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(step, error = %err, "best-effort step failed; continuing");
            None
        }
    }
}
