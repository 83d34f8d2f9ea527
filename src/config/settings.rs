use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub gcm: GcmConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GcmConfig {
    /// API key sent as `Authorization: key=...` on batch requests.
    /// Batch endpoints are rejected pre-flight when this is unset.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryConfig {
    /// Default time-to-live in seconds applied to outgoing web push
    /// notifications (the `TTL` header). None means no TTL header.
    pub default_ttl: Option<u32>,
    /// Per-request timeout in seconds, applied uniformly by the transport
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

fn default_request_timeout() -> u64 {
    30 // seconds
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("delivery.request_timeout", 30)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables
            // GCM_API_KEY, DELIVERY_DEFAULT_TTL, DELIVERY_REQUEST_TIMEOUT
            .add_source(
                Environment::default()
                    .separator("_")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            default_ttl: None,
            request_timeout: default_request_timeout(),
        }
    }
}

/// Programmatic configuration for embedding the client without the file/env
/// configuration machinery.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// GCM API key for legacy batch endpoints.
    pub gcm_api_key: Option<String>,
    /// Default TTL seconds for web push notifications.
    pub default_ttl: Option<u32>,
    /// Per-request timeout in seconds.
    pub request_timeout: u64,
}

impl From<&Settings> for ClientConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            gcm_api_key: settings.gcm.api_key.clone(),
            default_ttl: settings.delivery.default_ttl,
            request_timeout: settings.delivery.request_timeout,
        }
    }
}
