use crate::config::EcomaneConfig;
use crate::error::EcomaneError;
use async_trait::async_trait;
use encoding_rs::SHIFT_JIS;
use reqwest::Client as HttpClient;

/// Source of device pages. The poller only depends on this, so cycles can be
/// driven against an in-memory device in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `path` (relative to the device base URL) and returns the
    /// decoded body.
    async fn get(&self, path: &str) -> Result<String, EcomaneError>;
}

pub struct Client {
    http_client: HttpClient,
    base_url: String,
    timeout_sec: u64,
}

impl Client {
    pub fn new(config: EcomaneConfig) -> Result<Self, EcomaneError> {
        let http_client = HttpClient::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http_client,
            base_url: config.base_url(),
            timeout_sec: config.request_timeout_sec,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn transport_error(&self, err: reqwest::Error) -> EcomaneError {
        if err.is_timeout() {
            EcomaneError::Timeout(self.timeout_sec)
        } else {
            EcomaneError::Http(err)
        }
    }
}

#[async_trait]
impl PageFetcher for Client {
    async fn get(&self, path: &str) -> Result<String, EcomaneError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .header("user-agent", "reqwest")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EcomaneError::server_error(status, url));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        // Device pages are Shift_JIS whatever the headers claim
        let (text, had_errors) = SHIFT_JIS.decode_without_bom_handling(&bytes);
        if had_errors {
            tracing::warn!("Body of {} is not valid Shift_JIS", url);
        }
        Ok(text.into_owned())
    }
}
