//! Outbound notification email
//!
//! Notifications are rendered with handlebars and handed to an ordered chain
//! of transports: the configured SMTP relay, a Gmail implicit-TLS fallback,
//! and finally the log. Only a delivery by one of the SMTP stages counts as
//! "sent".

pub mod address;
pub mod sender;
pub mod template;
pub mod transport;

pub use address::{resolve_sender, SenderAddresses};
pub use sender::FallbackMailer;
pub use template::NotificationRenderer;
pub use transport::{ConsoleTransport, MailTransport, OutgoingMessage, SmtpTransport};
