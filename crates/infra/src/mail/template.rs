//! Handlebars rendering of notification emails

use fieldlink_domain::{NotificationContext, Result};
use handlebars::Handlebars;
use tracing::debug;

use crate::errors::InfraError;

const NOTIFICATION_TEMPLATE_NAME: &str = "notification";
const NOTIFICATION_TEMPLATE: &str = include_str!("../../templates/notification.html.hbs");

/// Renders [`NotificationContext`] into the HTML email body.
pub struct NotificationRenderer {
    handlebars: Handlebars<'static>,
}

impl NotificationRenderer {
    /// Compile the bundled template.
    pub fn new() -> Result<Self> {
        Self::with_template(NOTIFICATION_TEMPLATE)
    }

    /// Compile a custom template source.
    pub fn with_template(source: &str) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string(NOTIFICATION_TEMPLATE_NAME, source)
            .map_err(InfraError::from)?;
        Ok(Self { handlebars })
    }

    pub fn render(&self, context: &NotificationContext) -> Result<String> {
        let html = self
            .handlebars
            .render(NOTIFICATION_TEMPLATE_NAME, context)
            .map_err(InfraError::from)?;
        debug!(kind = %context.kind, bytes = html.len(), "rendered notification");
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use fieldlink_domain::{
        Brand, Contact, CustomerSummary, FieldLinkError, JobSummary, LocationSummary,
        NotificationKind, NotificationLinks,
    };
    use serde_json::json;

    use super::*;

    fn job_context() -> NotificationContext {
        NotificationContext {
            kind: NotificationKind::JobCreated,
            brand: Brand { name: "BlueCollar AI".into() },
            customer: CustomerSummary {
                id: None,
                name: "Acme & Sons".into(),
                contact: Contact {
                    name: Some("Ann".into()),
                    phone: Some("555-0100".into()),
                    email: None,
                },
            },
            job: Some(JobSummary {
                id: Some(json!(77)),
                number: Some(json!("1042")),
                status: Some("Unscheduled".into()),
                priority: Some("Normal".into()),
                category: Some("Cold side".into()),
                created_at: None,
                api_url: Some("https://api.servicefusion.com/v1/jobs/77".into()),
                description: "Walk-in cooler warm".into(),
            }),
            location: LocationSummary {
                name: "Store 4".into(),
                address: "1 Main St".into(),
                city: "Austin".into(),
                state: "TX".into(),
                zip: "78701".into(),
            },
            links: NotificationLinks {
                docx: Some("https://docs/1.docx".into()),
                json: None,
                rag: Some("https://docs/1.docx".into()),
            },
        }
    }

    #[test]
    fn renders_job_notification() {
        let html = NotificationRenderer::new().expect("template").render(&job_context()).expect("html");

        assert!(html.contains("BlueCollar AI"));
        assert!(html.contains("New work order created"));
        assert!(html.contains("Acme &amp; Sons"));
        assert!(html.contains("Cold side"));
        assert!(html.contains("1042"));
        assert!(html.contains("https://docs/1.docx"));
        assert!(html.contains("Austin, TX 78701"));
    }

    #[test]
    fn renders_customer_notification_without_job_section() {
        let mut context = job_context();
        context.kind = NotificationKind::CustomerCreated;
        context.job = None;
        context.links = NotificationLinks::default();

        let html = NotificationRenderer::new().expect("template").render(&context).expect("html");

        assert!(html.contains("New customer created"));
        assert!(!html.contains("Work order</h2>"));
        assert!(!html.contains("Summary document"));
    }

    #[test]
    fn malformed_template_is_a_template_error() {
        let err = NotificationRenderer::with_template("{{#if job}}unclosed").err().expect("should fail");
        assert!(matches!(err, FieldLinkError::Template(_)));
    }
}
