//! Fallback notification mailer

use async_trait::async_trait;
use fieldlink_core::Notifier;
use fieldlink_domain::utils::text::non_empty;
use fieldlink_domain::{FieldLinkError, MailConfig, Notification, Result};
use tracing::{error, info, instrument, warn};

use super::address::{resolve_sender, SenderAddresses};
use super::template::NotificationRenderer;
use super::transport::{ConsoleTransport, MailTransport, OutgoingMessage, SmtpTransport};

const CREDENTIALS_REJECTED_CODE: &str = "535";
const CREDENTIALS_REJECTED_TEXT: &str = "Username and Password not accepted";

/// Delivers notifications through an ordered list of transports, stopping at
/// the first that succeeds.
///
/// `notify` returns `Ok(true)` only when an external (SMTP) stage delivered the
/// message. Transport failures are logged and never returned.
pub struct FallbackMailer {
    senders: SenderAddresses,
    default_recipient: String,
    renderer: NotificationRenderer,
    stages: Vec<Box<dyn MailTransport>>,
}

impl FallbackMailer {
    /// Primary relay, then Gmail over implicit TLS when the relay is Gmail or
    /// unset, then the log.
    pub fn from_config(config: &MailConfig) -> Result<Self> {
        let mut stages: Vec<Box<dyn MailTransport>> = Vec::with_capacity(3);

        match SmtpTransport::primary(config) {
            Ok(primary) => stages.push(Box::new(primary)),
            Err(err) => warn!(error = %err, "primary SMTP transport unavailable"),
        }
        if gmail_fallback_applies(&config.host) {
            match SmtpTransport::gmail_ssl(config) {
                Ok(gmail) => stages.push(Box::new(gmail)),
                Err(err) => warn!(error = %err, "gmail SSL transport unavailable"),
            }
        }
        stages.push(Box::new(ConsoleTransport));

        Ok(Self::with_stages(config, NotificationRenderer::new()?, stages))
    }

    pub fn with_stages(
        config: &MailConfig,
        renderer: NotificationRenderer,
        stages: Vec<Box<dyn MailTransport>>,
    ) -> Self {
        Self {
            senders: resolve_sender(config),
            default_recipient: config.recipient.trim().to_string(),
            renderer,
            stages,
        }
    }

    /// Stage names in delivery order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    fn recipient<'a>(&'a self, notification: &'a Notification) -> Option<&'a str> {
        non_empty(notification.recipient.as_deref()).or_else(|| non_empty(Some(&self.default_recipient)))
    }
}

/// The Gmail fallback only runs for Gmail relays or when no relay is set.
#[must_use]
pub fn gmail_fallback_applies(host: &str) -> bool {
    let host = host.trim().to_lowercase();
    host.is_empty() || host.contains("gmail.com")
}

fn is_credential_rejection(err: &FieldLinkError) -> bool {
    let message = err.to_string();
    message.contains(CREDENTIALS_REJECTED_CODE) && message.contains(CREDENTIALS_REJECTED_TEXT)
}

fn log_stage_failure(stage: &str, err: &FieldLinkError) {
    if is_credential_rejection(err) {
        error!(
            stage,
            "SMTP 535: credentials rejected; EMAIL_HOST_USER must be the mailbox and \
             EMAIL_HOST_PASSWORD an app password"
        );
    } else {
        error!(stage, error = %err, "SMTP send failed");
    }
}

#[async_trait]
impl Notifier for FallbackMailer {
    #[instrument(skip(self, notification), fields(kind = %notification.context.kind))]
    async fn notify(&self, notification: &Notification) -> Result<bool> {
        let Some(recipient) = self.recipient(notification) else {
            warn!("no recipient provided; skipping email");
            return Ok(false);
        };

        let message = OutgoingMessage {
            subject: notification.subject.clone(),
            html: self.renderer.render(&notification.context)?,
            to: recipient.to_string(),
            envelope_from: self.senders.envelope_from.clone(),
            header_from: self.senders.header_from.clone(),
        };

        for stage in &self.stages {
            match stage.send(&message).await {
                Ok(()) if stage.is_external() => {
                    info!(stage = stage.name(), to = %message.to, "notification delivered");
                    return Ok(true);
                }
                Ok(()) => {
                    info!(stage = stage.name(), "notification not delivered externally");
                    return Ok(false);
                }
                Err(err) => log_stage_failure(stage.name(), &err),
            }
        }

        Ok(false)
    }
}
