//! Notification port

use async_trait::async_trait;
use fieldlink_domain::{Notification, Result};

/// Trait for delivering request notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Render and deliver a notification.
    ///
    /// `Ok(true)` only when an external transport accepted the message.
    /// `Ok(false)` covers "no recipient" and "every external transport
    /// failed". `Err` is reserved for failures before any transport was
    /// tried, such as a broken template.
    async fn notify(&self, notification: &Notification) -> Result<bool>;
}
