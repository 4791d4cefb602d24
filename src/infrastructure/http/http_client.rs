//! reqwest wrapper used for storefront pages

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

use crate::shared::errors::ScrapeError;
use crate::shared::types::HttpConfig;

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create new client with timeout and user agent from config
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    /// Underlying reqwest client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// GET a page and return its body
    pub async fn get_text(&self, url: &str) -> Result<String, ScrapeError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Request to \"{}\" failed: {}", url, e);
            ScrapeError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Request to \"{}\" failed with status {}", url, status);
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| ScrapeError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
