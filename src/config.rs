use crate::error::ConfigError;
use serde_derive::Deserialize;
use std::str::FromStr;
use std::time::Duration;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub(crate) fn load_app_config() -> Result<AppConfig, ConfigError> {
    envy::from_env::<AppConfig>().map_err(ConfigError::env_parse)
}

fn default_request_timeout_sec() -> u64 {
    10
}

/// Where the device lives. The address is the only setting that has no default.
#[derive(Deserialize, Debug, Clone)]
pub struct EcomaneConfig {
    pub address: String,
    #[serde(default = "default_request_timeout_sec")]
    pub request_timeout_sec: u64,
}

impl EcomaneConfig {
    /// Base URL for every request. A bare host or IP gets `http://` prepended.
    pub fn base_url(&self) -> String {
        let address = self.address.trim().trim_end_matches('/');
        if address.starts_with("http://") || address.starts_with("https://") {
            address.to_string()
        } else {
            format!("http://{}", address)
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_sec)
    }
}

pub(crate) fn load_ecomane_config() -> Result<EcomaneConfig, ConfigError> {
    let config = envy::prefixed("ECOMANE_")
        .from_env::<EcomaneConfig>()
        .map_err(ConfigError::env_parse)?;
    if config.address.trim().is_empty() {
        return Err(ConfigError::missing("ECOMANE_ADDRESS"));
    }
    if config.request_timeout_sec == 0 {
        return Err(ConfigError::invalid(
            "ECOMANE_REQUEST_TIMEOUT_SEC",
            "must be greater than zero",
        ));
    }
    Ok(config)
}

fn default_poll_interval_sec() -> u64 {
    60
}

fn default_retry_interval_sec() -> u64 {
    120
}

fn default_max_pages() -> u32 {
    20
}

#[derive(Deserialize, Debug, Clone)]
pub struct PollerConfig {
    #[serde(default = "default_poll_interval_sec")]
    pub poll_interval_sec: u64,
    // delay between bootstrap attempts
    #[serde(default = "default_retry_interval_sec")]
    pub retry_interval_sec: u64,
    // hard cap on circuit pages scanned in one cycle
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval_sec: default_poll_interval_sec(),
            retry_interval_sec: default_retry_interval_sec(),
            max_pages: default_max_pages(),
        }
    }
}

impl PollerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_sec)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_sec)
    }
}

pub fn load_poller_config() -> Result<PollerConfig, ConfigError> {
    let config = envy::prefixed("POLLER_")
        .from_env::<PollerConfig>()
        .map_err(ConfigError::env_parse)?;
    if config.poll_interval_sec == 0 {
        return Err(ConfigError::invalid(
            "POLLER_POLL_INTERVAL_SEC",
            "must be greater than zero",
        ));
    }
    if config.max_pages == 0 {
        return Err(ConfigError::invalid(
            "POLLER_MAX_PAGES",
            "must be greater than zero",
        ));
    }
    Ok(config)
}

#[derive(Deserialize, Debug)]
pub struct InfluxConfig {
    pub url: String,
    pub token: String,
    pub org: String,
    pub bucket: String,
}

/// Loads the optional InfluxDB sink settings.
///
/// Without `INFLUXDB_URL` the sink is disabled and `Ok(None)` is returned;
/// once the URL is set the remaining variables become mandatory.
pub fn load_influx_config() -> Result<Option<InfluxConfig>, ConfigError> {
    if std::env::var("INFLUXDB_URL").is_err() {
        return Ok(None);
    }
    envy::prefixed("INFLUXDB_")
        .from_env::<InfluxConfig>()
        .map(Some)
        .map_err(ConfigError::env_parse)
}
