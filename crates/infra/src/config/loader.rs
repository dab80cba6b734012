//! Configuration loader
//!
//! ## Loading Strategy
//! 1. `FIELDLINK_CONFIG` names a file, or one is found by probing
//! 2. Otherwise start from [`Config::default`]
//! 3. Environment variables override whatever the file set
//!
//! ## Environment Variables
//! - `FIELDLINK_BIND_ADDR`: Listen address
//! - `SERVICE_FUSION_BASE_URL`, `SERVICE_FUSION_API_PREFIX`,
//!   `SERVICE_FUSION_TOKEN_URL`: API endpoints
//! - `SERVICE_FUSION_CLIENT_ID`, `SERVICE_FUSION_CLIENT_SECRET`: OAuth client
//! - `HTTP_TIMEOUT`: Outbound HTTP timeout in seconds
//! - `EMAIL_HOST`, `EMAIL_PORT`, `EMAIL_HOST_USER`, `EMAIL_HOST_PASSWORD`,
//!   `EMAIL_USE_TLS`, `EMAIL_USE_SSL`, `EMAIL_TIMEOUT`: SMTP relay
//! - `DEFAULT_FROM_EMAIL`: Sender, optionally `Name <address>`
//! - `WORKORDER_RECIPIENT`: Inbox for notifications without a recipient
//! - `LLM_API_URL`, `LLM_API_KEY`: Summarization endpoint
//! - `FIELDLINK_BRAND_NAME`: Name shown in emails
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./fieldlink.{toml,json}` or `./config.{toml,json}` (current working
//!    directory)
//! 2. `../config.{toml,json}` and `../../config.{toml,json}`
//! 3. The same names relative to the executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use fieldlink_domain::{Config, FieldLinkError, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "FIELDLINK_CONFIG";

/// Load configuration: file (if any), then environment overrides.
///
/// # Errors
/// Returns `FieldLinkError::Config` if:
/// - `FIELDLINK_CONFIG` points at a missing or malformed file
/// - A probed file is malformed
/// - A numeric environment variable does not parse
pub fn load() -> Result<Config> {
    let explicit = std::env::var(CONFIG_PATH_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);

    let mut config = match explicit.or_else(probe_config_paths) {
        Some(path) => load_from_file(&path)?,
        None => {
            tracing::debug!("No config file found, starting from defaults");
            Config::default()
        }
    };

    apply_env_overrides(&mut config)?;
    tracing::info!(
        bind_addr = %config.server.bind_addr,
        api_root = %config.service_fusion.api_root(),
        mail_host = %config.mail.host,
        summarizer = config.summarizer.endpoint().is_some(),
        "Configuration loaded"
    );
    Ok(config)
}

/// Load configuration from a file
///
/// Supports both JSON and TOML formats (detected by file extension). Missing
/// sections and fields take their defaults.
///
/// # Errors
/// Returns `FieldLinkError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(FieldLinkError::Config(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| FieldLinkError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, path)
}

/// Apply environment variable overrides on top of `config`.
///
/// Unset variables leave the current value alone. Blank values clear optional
/// settings.
///
/// # Errors
/// Returns `FieldLinkError::Config` for malformed numbers.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(addr) = env_string("FIELDLINK_BIND_ADDR") {
        config.server.bind_addr = addr;
    }

    let sf = &mut config.service_fusion;
    if let Some(base_url) = env_string("SERVICE_FUSION_BASE_URL") {
        sf.base_url = base_url;
    }
    sf.base_url = sf.base_url.trim_end_matches('/').to_string();
    if let Some(prefix) = env_string("SERVICE_FUSION_API_PREFIX") {
        sf.api_prefix = prefix;
    }
    if let Some(token_url) = env_string("SERVICE_FUSION_TOKEN_URL") {
        sf.token_url = Some(token_url).filter(|url| !url.is_empty());
    }
    if let Some(client_id) = env_string("SERVICE_FUSION_CLIENT_ID") {
        sf.client_id = client_id;
    }
    if let Some(client_secret) = env_string("SERVICE_FUSION_CLIENT_SECRET") {
        sf.client_secret = client_secret;
    }
    if let Some(timeout) = env_number("HTTP_TIMEOUT")? {
        sf.timeout_secs = timeout;
    }

    let mail = &mut config.mail;
    if let Some(host) = env_string("EMAIL_HOST") {
        mail.host = host;
    }
    if let Some(port) = env_number::<u16>("EMAIL_PORT")? {
        mail.port = (port != 0).then_some(port);
    }
    if let Some(user) = env_string("EMAIL_HOST_USER") {
        mail.username = user;
    }
    if let Some(password) = env_string("EMAIL_HOST_PASSWORD") {
        mail.password = password;
    }
    mail.use_tls = env_bool("EMAIL_USE_TLS", mail.use_tls);
    mail.use_ssl = env_bool("EMAIL_USE_SSL", mail.use_ssl);
    if let Some(timeout) = env_number("EMAIL_TIMEOUT")? {
        mail.timeout_secs = timeout;
    }
    if let Some(from) = env_string("DEFAULT_FROM_EMAIL") {
        mail.default_from = from;
    }
    if let Some(recipient) = env_string("WORKORDER_RECIPIENT") {
        mail.recipient = recipient;
    }

    if let Some(url) = env_string("LLM_API_URL") {
        config.summarizer.url = Some(url).filter(|u| !u.is_empty());
    }
    if let Some(key) = env_string("LLM_API_KEY") {
        config.summarizer.api_key = Some(key).filter(|k| !k.is_empty());
    }

    if let Some(brand) = env_string("FIELDLINK_BRAND_NAME").filter(|b| !b.is_empty()) {
        config.branding.name = brand;
    }

    Ok(())
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `FieldLinkError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| FieldLinkError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| FieldLinkError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(FieldLinkError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 8] = [
        "fieldlink.toml",
        "fieldlink.json",
        "config.toml",
        "config.json",
        "../config.toml",
        "../config.json",
        "../../config.toml",
        "../../config.json",
    ];

    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(NAMES.iter().map(|name| cwd.join(name)));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.is_file())
}

/// Trimmed value of a set environment variable.
fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|value| value.trim().to_string())
}

/// Parse a numeric environment variable. Unset or blank is `None`.
///
/// # Errors
/// Returns `FieldLinkError::Config` if the value is not a valid number.
fn env_number<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_string(key).filter(|value| !value.is_empty()) {
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| FieldLinkError::Config(format!("Invalid {key} '{value}': {e}"))),
        None => Ok(None),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
