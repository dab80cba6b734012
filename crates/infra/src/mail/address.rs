//! Sender address resolution

use fieldlink_domain::utils::text::non_empty;
use fieldlink_domain::MailConfig;
use once_cell::sync::Lazy;
use regex::Regex;

/// Last-resort envelope sender.
pub const FALLBACK_SENDER: &str = "no-reply@localhost";

static ANGLE_ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([^>]+)>").expect("ANGLE_ADDRESS should compile - this is a bug"));

/// Envelope sender plus the optional branded `From` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderAddresses {
    pub envelope_from: String,
    pub header_from: Option<String>,
}

/// Resolve sender addresses for the configured relay.
///
/// Mailjet relays authenticate with API keys, so the envelope sender is the
/// address inside `DEFAULT_FROM_EMAIL`. Every other relay gets the SMTP user,
/// which Gmail requires to match the authenticated mailbox.
#[must_use]
pub fn resolve_sender(config: &MailConfig) -> SenderAddresses {
    let display = non_empty(Some(&config.default_from));
    let user = non_empty(Some(&config.username));

    let envelope_from = if config.host.to_lowercase().contains("mailjet") {
        display
            .and_then(|value| ANGLE_ADDRESS.captures(value))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .or(display)
            .unwrap_or(FALLBACK_SENDER)
    } else {
        user.or(display).unwrap_or(FALLBACK_SENDER)
    };

    SenderAddresses {
        envelope_from: envelope_from.to_string(),
        header_from: display.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str, user: &str, from: &str) -> MailConfig {
        MailConfig {
            host: host.into(),
            username: user.into(),
            default_from: from.into(),
            ..MailConfig::default()
        }
    }

    #[test]
    fn mailjet_uses_address_inside_display_name() {
        let senders = resolve_sender(&config(
            "in-v3.mailjet.com",
            "api-key",
            "AI_WORK_ORDER <operation@blue-collar.us>",
        ));

        assert_eq!(senders.envelope_from, "operation@blue-collar.us");
        assert_eq!(senders.header_from.as_deref(), Some("AI_WORK_ORDER <operation@blue-collar.us>"));
    }

    #[test]
    fn mailjet_without_brackets_uses_whole_value() {
        let senders = resolve_sender(&config("in-v3.MAILJET.com", "", "ops@blue-collar.us"));
        assert_eq!(senders.envelope_from, "ops@blue-collar.us");
    }

    #[test]
    fn other_hosts_prefer_smtp_user() {
        let senders = resolve_sender(&config("smtp.gmail.com", "mailbox@gmail.com", "Brand <b@x.us>"));

        assert_eq!(senders.envelope_from, "mailbox@gmail.com");
        assert_eq!(senders.header_from.as_deref(), Some("Brand <b@x.us>"));
    }

    #[test]
    fn falls_back_to_localhost_sender() {
        let senders = resolve_sender(&config("", "", ""));

        assert_eq!(senders.envelope_from, FALLBACK_SENDER);
        assert_eq!(senders.header_from, None);
    }
}
