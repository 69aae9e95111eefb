//! HTTP client abstraction for testability

use std::future::Future;
use std::time::Duration;

use super::FeatureInfoError;

/// Default transport timeout for feature queries.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Trait for async HTTP GET operations.
///
/// This abstraction allows for dependency injection and easier testing by
/// enabling mock HTTP clients in tests.
pub trait AsyncHttpClient: Send + Sync + 'static {
    /// Performs an HTTP GET request, returning the response body as bytes.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FeatureInfoError>> + Send;
}

/// Real HTTP client implementation using reqwest.
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, FeatureInfoError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new ReqwestClient with custom transport timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, FeatureInfoError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                FeatureInfoError::Http(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FeatureInfoError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FeatureInfoError::Http(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(FeatureInfoError::Http(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| FeatureInfoError::Http(format!("Failed to read response: {}", e)))
    }
}
