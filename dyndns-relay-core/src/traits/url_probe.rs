//! HTTP probe backend.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};

/// Issues the HTTP GET a `"GET"` rule dispatches to.
#[async_trait]
pub trait UrlProbe: Send + Sync {
    /// Fetch `url`; any transport error or non-2xx status is an error.
    async fn get(&self, url: &str) -> CoreResult<()>;
}

/// Default connect timeout (seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Production probe backed by a shared `reqwest` client with bounded
/// timeouts.
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
                .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlProbe for HttpProbe {
    async fn get(&self, url: &str) -> CoreResult<()> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CoreError::ProbeFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::ProbeFailed(format!(
                "GET {url} returned {status}"
            )));
        }

        // The body is only of diagnostic interest.
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::ProbeFailed(e.to_string()))?;
        log::debug!("GET {url} -> {status}: {body}");

        Ok(())
    }
}
