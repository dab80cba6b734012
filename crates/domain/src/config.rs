//! Configuration types

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BRAND_NAME;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_SERVICE_FUSION_BASE_URL: &str = "https://api.servicefusion.com";
pub const DEFAULT_API_PREFIX: &str = "/v1";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 25;
pub const DEFAULT_EMAIL_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_FROM_EMAIL: &str = "no-reply@works-service.us";
pub const DEFAULT_WORKORDER_RECIPIENT: &str = "AI_Workorder@works-service.us";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub service_fusion: ServiceFusionConfig,
    pub mail: MailConfig,
    pub summarizer: SummarizerConfig,
    pub branding: BrandingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: DEFAULT_BIND_ADDR.to_string() }
    }
}

/// External field-service API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceFusionConfig {
    pub base_url: String,
    pub api_prefix: String,
    /// Token endpoint; `<base_url>/oauth/access_token` when unset.
    pub token_url: Option<String>,
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
    pub timeout_secs: u64,
}

impl Default for ServiceFusionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_FUSION_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            token_url: None,
            client_id: String::new(),
            client_secret: String::new(),
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl ServiceFusionConfig {
    /// Base URL plus version prefix, e.g. `https://api.servicefusion.com/v1`.
    ///
    /// The prefix is joined with exactly one `/` whether or not it carries one.
    #[must_use]
    pub fn api_root(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim().trim_matches('/');
        if prefix.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{prefix}")
        }
    }

    #[must_use]
    pub fn token_endpoint(&self) -> String {
        match self.token_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!("{}/oauth/access_token", self.base_url.trim_end_matches('/')),
        }
    }
}

/// Outbound SMTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// SMTP relay host. Empty means "not configured".
    pub host: String,
    pub port: Option<u16>,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub use_tls: bool,
    pub use_ssl: bool,
    pub timeout_secs: u64,
    pub default_from: String,
    pub recipient: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: None,
            username: String::new(),
            password: String::new(),
            use_tls: false,
            use_ssl: false,
            timeout_secs: DEFAULT_EMAIL_TIMEOUT_SECS,
            default_from: DEFAULT_FROM_EMAIL.to_string(),
            recipient: DEFAULT_WORKORDER_RECIPIENT.to_string(),
        }
    }
}

impl MailConfig {
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

/// Optional LLM summarization endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub url: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl SummarizerConfig {
    /// The endpoint, when one is configured.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingConfig {
    pub name: String,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self { name: DEFAULT_BRAND_NAME.to_string() }
    }
}
