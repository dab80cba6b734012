//! Mail transports: SMTP relays and the log-only console fallback.

use std::time::Duration;

use async_trait::async_trait;
use fieldlink_domain::utils::text::non_empty;
use fieldlink_domain::{MailConfig, Result};
use lettre::address::{Address, Envelope};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info, warn};

use crate::errors::InfraError;

const GMAIL_SMTP_HOST: &str = "smtp.gmail.com";
const GMAIL_SSL_PORT: u16 = 465;
const DEFAULT_SMTP_HOST: &str = "localhost";

/// A rendered HTML email ready for any transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub subject: String,
    pub html: String,
    pub to: String,
    pub envelope_from: String,
    /// Branded `From` header; the envelope sender is used when absent.
    pub header_from: Option<String>,
}

impl OutgoingMessage {
    /// Build the lettre message with an explicit envelope.
    pub fn to_lettre(&self) -> Result<Message> {
        let to: Mailbox = self.to.trim().parse().map_err(InfraError::from)?;
        let envelope_from: Address = self.envelope_from.trim().parse().map_err(InfraError::from)?;

        let from = match self.header_from.as_deref().map(str::parse::<Mailbox>) {
            Some(Ok(mailbox)) => mailbox,
            Some(Err(err)) => {
                warn!(error = %err, "unparseable From header, using envelope sender");
                Mailbox::new(None, envelope_from.clone())
            }
            None => Mailbox::new(None, envelope_from.clone()),
        };

        let envelope =
            Envelope::new(Some(envelope_from), vec![to.email.clone()]).map_err(InfraError::from)?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(self.subject.clone())
            .header(ContentType::TEXT_HTML)
            .envelope(envelope)
            .body(self.html.clone())
            .map_err(InfraError::from)?;
        Ok(message)
    }
}

/// One delivery stage of the notification chain.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Stage label used in logs.
    fn name(&self) -> &str;

    /// Whether a success means the message actually left the process.
    fn is_external(&self) -> bool {
        true
    }

    async fn send(&self, message: &OutgoingMessage) -> Result<()>;
}

/// SMTP connection security.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// Plain connection.
    None,
    /// STARTTLS upgrade.
    StartTls,
    /// Implicit TLS.
    Tls,
}

impl SmtpSecurity {
    /// Implicit TLS wins over STARTTLS when both flags are set.
    #[must_use]
    pub const fn from_flags(use_tls: bool, use_ssl: bool) -> Self {
        if use_ssl {
            Self::Tls
        } else if use_tls {
            Self::StartTls
        } else {
            Self::None
        }
    }
}

/// SMTP relay transport.
pub struct SmtpTransport {
    name: String,
    host: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpTransport {
    /// The relay described by the mail settings; `localhost` when no host is
    /// configured.
    pub fn primary(config: &MailConfig) -> Result<Self> {
        let host = non_empty(Some(&config.host)).unwrap_or(DEFAULT_SMTP_HOST);
        Self::build(
            "primary",
            host,
            config.port,
            SmtpSecurity::from_flags(config.use_tls, config.use_ssl),
            config,
        )
    }

    /// Gmail over implicit TLS on 465 with the same credentials.
    pub fn gmail_ssl(config: &MailConfig) -> Result<Self> {
        Self::build("gmail_ssl", GMAIL_SMTP_HOST, Some(GMAIL_SSL_PORT), SmtpSecurity::Tls, config)
    }

    fn build(
        name: &str,
        host: &str,
        port: Option<u16>,
        security: SmtpSecurity,
        config: &MailConfig,
    ) -> Result<Self> {
        let mut builder = match security {
            SmtpSecurity::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host),
            SmtpSecurity::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .map_err(InfraError::from)?,
            SmtpSecurity::Tls => {
                AsyncSmtpTransport::<Tokio1Executor>::relay(host).map_err(InfraError::from)?
            }
        };

        if let Some(port) = port {
            builder = builder.port(port);
        }
        builder = builder.timeout(Some(Duration::from_secs(config.timeout_secs)));

        if config.has_credentials() {
            builder = builder.credentials(Credentials::new(
                config.username.trim().to_string(),
                config.password.trim().to_string(),
            ));
        }

        debug!(stage = name, host, ?port, ?security, "configured SMTP transport");
        Ok(Self { name: name.to_string(), host: host.to_string(), transport: builder.build() })
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }
}

#[async_trait]
impl MailTransport for SmtpTransport {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, message: &OutgoingMessage) -> Result<()> {
        let email = message.to_lettre()?;
        self.transport.send(email).await.map_err(InfraError::from)?;
        info!(stage = %self.name, host = %self.host, to = %message.to, "email sent");
        Ok(())
    }
}

/// Writes the message to the log instead of delivering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleTransport;

#[async_trait]
impl MailTransport for ConsoleTransport {
    fn name(&self) -> &str {
        "console"
    }

    fn is_external(&self) -> bool {
        false
    }

    async fn send(&self, message: &OutgoingMessage) -> Result<()> {
        info!(
            to = %message.to,
            from = %message.envelope_from,
            subject = %message.subject,
            body = %message.html,
            "email written to log (console fallback)"
        );
        Ok(())
    }
}
