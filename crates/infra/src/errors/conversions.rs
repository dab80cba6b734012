//! Conversions from external infrastructure errors into domain errors.

use fieldlink_domain::FieldLinkError;
use handlebars::{RenderError, TemplateError};
use lettre::address::AddressError;
use lettre::error::Error as MessageError;
use lettre::transport::smtp::Error as SmtpError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub FieldLinkError);

impl From<InfraError> for FieldLinkError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<FieldLinkError> for InfraError {
    fn from(value: FieldLinkError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoFieldLinkError {
    fn into_fieldlink(self) -> FieldLinkError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → FieldLinkError */
/* -------------------------------------------------------------------------- */

impl IntoFieldLinkError for HttpError {
    fn into_fieldlink(self) -> FieldLinkError {
        if self.is_timeout() {
            return FieldLinkError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return FieldLinkError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            return FieldLinkError::UpstreamHttp {
                status: status.as_u16(),
                body: status.canonical_reason().unwrap_or("unknown status").to_string(),
            };
        }

        if self.is_decode() {
            return FieldLinkError::Internal(format!("invalid upstream response body: {self}"));
        }

        FieldLinkError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_fieldlink())
    }
}

/* -------------------------------------------------------------------------- */
/* lettre errors → FieldLinkError */
/* -------------------------------------------------------------------------- */

impl IntoFieldLinkError for SmtpError {
    fn into_fieldlink(self) -> FieldLinkError {
        // Display carries the SMTP code and server text, e.g.
        // "permanent error (535): 5.7.8 Username and Password not accepted".
        FieldLinkError::Mail(self.to_string())
    }
}

impl From<SmtpError> for InfraError {
    fn from(value: SmtpError) -> Self {
        InfraError(value.into_fieldlink())
    }
}

impl From<AddressError> for InfraError {
    fn from(value: AddressError) -> Self {
        InfraError(FieldLinkError::Mail(format!("invalid mail address: {value}")))
    }
}

impl From<MessageError> for InfraError {
    fn from(value: MessageError) -> Self {
        InfraError(FieldLinkError::Mail(format!("failed to build message: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* handlebars errors → FieldLinkError */
/* -------------------------------------------------------------------------- */

impl From<RenderError> for InfraError {
    fn from(value: RenderError) -> Self {
        InfraError(FieldLinkError::Template(value.to_string()))
    }
}

impl From<TemplateError> for InfraError {
    fn from(value: TemplateError) -> Self {
        InfraError(FieldLinkError::Template(value.to_string()))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
