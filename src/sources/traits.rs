//! Trait definitions for metric sources
//!
//! These traits abstract over HTTP so collectors can be tested with mocks.

use crate::domain::Indicator;
use crate::error::CollectionError;
use serde_json::Value;

/// A single GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    /// Create a request for a URL
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    /// Builder: add a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Builder: add several query parameters
    pub fn queries<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Builder: add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Get a query parameter value
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Trait for read-only HTTP access
pub trait HttpFetcher {
    /// Fetch the response body as text
    fn get_text(&self, request: &FetchRequest) -> Result<String, CollectionError>;

    /// Fetch and parse the response body as JSON
    fn get_json(&self, request: &FetchRequest) -> Result<Value, CollectionError> {
        let body = self.get_text(request)?;
        serde_json::from_str(&body).map_err(|e| CollectionError::MalformedResponse {
            url: request.url.clone(),
            message: e.to_string(),
        })
    }
}

/// Trait for a single-indicator collector
pub trait Collector {
    /// Indicator produced by this collector
    fn indicator(&self) -> Indicator;

    /// Fetch the current value
    fn collect(&self, fetcher: &dyn HttpFetcher) -> Result<f64, CollectionError>;
}
