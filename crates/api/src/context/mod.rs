//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use fieldlink_common::time::{Clock, SystemClock};
use fieldlink_core::{CustomerService, FieldServiceClient, Notifier, Summarizer, WorkOrderService};
use fieldlink_domain::{Brand, Config, Result};
use fieldlink_infra::{FallbackMailer, HttpClient, ServiceFusionClient, SummarizerClient};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub field_service: Arc<dyn FieldServiceClient>,
    pub customers: CustomerService,
    pub work_orders: WorkOrderService,
}

impl AppContext {
    /// Build the production adapters from configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or the email template cannot be
    /// constructed.
    pub fn new(config: Config) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let field_service: Arc<dyn FieldServiceClient> =
            Arc::new(ServiceFusionClient::from_config(&config.service_fusion, clock)?);

        let summarizer_http = HttpClient::builder()
            .timeout(Duration::from_secs(config.service_fusion.timeout_secs))
            .build()?;
        let summarizer: Arc<dyn Summarizer> =
            Arc::new(SummarizerClient::new(&config.summarizer, summarizer_http));

        let mailer = FallbackMailer::from_config(&config.mail)?;
        info!(stages = ?mailer.stage_names(), "mail chain ready");
        let notifier: Arc<dyn Notifier> = Arc::new(mailer);

        Ok(Self::from_parts(config, field_service, summarizer, notifier))
    }

    /// Assemble the context from already-built adapters.
    pub fn from_parts(
        config: Config,
        field_service: Arc<dyn FieldServiceClient>,
        summarizer: Arc<dyn Summarizer>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let brand = Brand { name: config.branding.name.clone() };

        let customers =
            CustomerService::new(Arc::clone(&field_service), Arc::clone(&notifier), brand.clone());
        let work_orders =
            WorkOrderService::new(Arc::clone(&field_service), summarizer, notifier, brand);

        Self { config, field_service, customers, work_orders }
    }
}
