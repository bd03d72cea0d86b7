use std::time::Duration;

use reqwest::blocking::Client;

use crate::{
    assets::decode::decode_image,
    foundation::error::{BannerError, BannerResult},
};

/// Settings for [`ImageFetcher`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    /// Sent as the `User-Agent` header; some CDNs refuse requests without a browser-like one.
    pub user_agent: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Single-shot HTTP image loader. No retries.
pub struct ImageFetcher {
    client: Client,
    config: FetchConfig,
}

impl ImageFetcher {
    pub fn new(config: FetchConfig) -> BannerResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// GET `url` and decode the body as an image.
    ///
    /// Timeouts, connection errors, non-2xx statuses and undecodable bodies all map to
    /// [`BannerError::NetworkFetch`].
    #[tracing::instrument(skip(self))]
    pub fn fetch(&self, url: &str) -> BannerResult<image::DynamicImage> {
        let resp = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, self.config.user_agent.as_str())
            .send()
            .map_err(|e| BannerError::network_fetch(url, e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BannerError::network_fetch(url, format!("HTTP status {status}")));
        }

        let body = resp
            .bytes()
            .map_err(|e| BannerError::network_fetch(url, format!("read body: {e}")))?;
        tracing::debug!(bytes = body.len(), "fetched image body");

        decode_image(&body).map_err(|e| BannerError::network_fetch(url, e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
