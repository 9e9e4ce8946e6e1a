//! Blocking HTTP client for metric sources
//!
//! Every request is bounded by the configured timeout. A timeout only fails
//! the collector that issued the request.

use super::traits::{FetchRequest, HttpFetcher};
use crate::error::{CollectionError, ConfigError};
use reqwest::blocking::Client;
use std::time::Duration;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// reqwest-backed fetcher
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a client with the given per-request timeout
    pub fn new(timeout: Duration) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                key: "http".to_string(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, timeout })
    }

    /// Configured timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn map_error(&self, url: &str, err: reqwest::Error) -> CollectionError {
        if err.is_timeout() {
            CollectionError::Timeout {
                url: url.to_string(),
                secs: self.timeout.as_secs(),
            }
        } else if let Some(status) = err.status() {
            CollectionError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else {
            CollectionError::Network {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

impl HttpFetcher for HttpClient {
    fn get_text(&self, request: &FetchRequest) -> Result<String, CollectionError> {
        log::debug!("GET {} ({} params)", request.url, request.query.len());

        let mut builder = self.client.get(&request.url).query(&request.query);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .map_err(|e| self.map_error(&request.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectionError::HttpStatus {
                url: request.url.clone(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| self.map_error(&request.url, e))
    }
}
