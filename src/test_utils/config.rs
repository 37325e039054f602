//! Configuration builders for tests.

use crate::config::{EcomaneConfig, InfluxConfig, PollerConfig};

/// Builder for test InfluxDB configurations.
#[derive(Debug)]
pub struct TestInfluxConfigBuilder {
    url: String,
    org: String,
    token: String,
    bucket: String,
}

impl TestInfluxConfigBuilder {
    pub fn new() -> Self {
        Self {
            url: "http://localhost:8086".to_string(),
            org: "test-org".to_string(),
            token: "test-token".to_string(),
            bucket: "test-bucket".to_string(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    pub fn build(self) -> InfluxConfig {
        InfluxConfig {
            url: self.url,
            org: self.org,
            token: self.token,
            bucket: self.bucket,
        }
    }
}

/// Device configuration pointing at `address`, with the default timeout.
pub fn test_ecomane_config(address: &str) -> EcomaneConfig {
    EcomaneConfig {
        address: address.to_string(),
        request_timeout_sec: 10,
    }
}

/// Production intervals and page cap; tests that depend on timing run on
/// a paused clock.
pub fn test_poller_config() -> PollerConfig {
    PollerConfig {
        poll_interval_sec: 60,
        retry_interval_sec: 120,
        max_pages: 20,
    }
}

pub fn test_influx_config() -> InfluxConfig {
    TestInfluxConfigBuilder::new().build()
}

/// InfluxDB configuration for a mock server at `url`.
pub fn test_influx_config_with_url(url: impl Into<String>) -> InfluxConfig {
    TestInfluxConfigBuilder::new().with_url(url).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_influx_config_builder() {
        let config = TestInfluxConfigBuilder::new()
            .with_url("http://influx.local")
            .with_bucket("ecomane")
            .build();

        assert_eq!(config.url, "http://influx.local");
        assert_eq!(config.org, "test-org");
        assert_eq!(config.bucket, "ecomane");
    }

    #[test]
    fn test_ecomane_config_uses_default_timeout() {
        let config = test_ecomane_config("10.0.0.5");
        assert_eq!(config.base_url(), "http://10.0.0.5");
        assert_eq!(config.request_timeout_sec, 10);
    }

    #[test]
    fn test_poller_config_matches_defaults() {
        let config = test_poller_config();
        let defaults = PollerConfig::default();
        assert_eq!(config.poll_interval_sec, defaults.poll_interval_sec);
        assert_eq!(config.retry_interval_sec, defaults.retry_interval_sec);
        assert_eq!(config.max_pages, defaults.max_pages);
    }
}
