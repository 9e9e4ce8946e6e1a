//! Mock implementations for testing
//!
//! Provides a canned HTTP fetcher, recording messengers and fixed-value
//! collectors so the pipeline can be exercised without network access.

use crate::alerts::Messenger;
use crate::domain::Indicator;
use crate::error::{CollectionError, DispatchError};
use crate::sources::{Collector, FetchRequest, HttpFetcher};

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Canned response for a URL
#[derive(Debug, Clone)]
pub enum MockResponse {
    Body(String),
    Status(u16),
    Timeout,
}

/// HTTP fetcher answering from a URL table
///
/// Query strings are ignored for matching but recorded with each call.
/// Unknown URLs fail with a network error.
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: HashMap<String, MockResponse>,
    calls: Mutex<Vec<FetchRequest>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: answer `url` with a JSON body
    pub fn with_json(self, url: &str, body: Value) -> Self {
        self.with_text(url, body.to_string())
    }

    /// Builder: answer `url` with a raw body
    pub fn with_text(mut self, url: &str, body: impl Into<String>) -> Self {
        self.responses
            .insert(url.to_string(), MockResponse::Body(body.into()));
        self
    }

    /// Builder: answer `url` with a failure
    pub fn with_response(mut self, url: &str, response: MockResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    /// Requests seen so far
    pub fn calls(&self) -> Vec<FetchRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl HttpFetcher for MockFetcher {
    fn get_text(&self, request: &FetchRequest) -> Result<String, CollectionError> {
        self.calls.lock().unwrap().push(request.clone());

        match self.responses.get(&request.url) {
            Some(MockResponse::Body(body)) => Ok(body.clone()),
            Some(MockResponse::Status(status)) => Err(CollectionError::HttpStatus {
                url: request.url.clone(),
                status: *status,
            }),
            Some(MockResponse::Timeout) => Err(CollectionError::Timeout {
                url: request.url.clone(),
                secs: 10,
            }),
            None => Err(CollectionError::Network {
                url: request.url.clone(),
                message: "no mock response".to_string(),
            }),
        }
    }
}

/// A message captured by [`RecordingMessenger`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub from: String,
    pub to: String,
    pub body: String,
}

/// Messenger that records every send
///
/// Clones share the same log, so a test can keep a handle after boxing one.
#[derive(Debug, Clone, Default)]
pub struct RecordingMessenger {
    sent: Arc<Mutex<Vec<SentMessage>>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Messenger for RecordingMessenger {
    fn send(&self, from: &str, to: &str, body: &str) -> Result<(), DispatchError> {
        self.sent.lock().unwrap().push(SentMessage {
            from: from.to_string(),
            to: to.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Messenger that always fails
#[derive(Debug, Clone, Copy)]
pub struct FailingMessenger;

impl Messenger for FailingMessenger {
    fn send(&self, _from: &str, _to: &str, _body: &str) -> Result<(), DispatchError> {
        Err(DispatchError::Rejected {
            status: 401,
            body: "Authenticate".to_string(),
        })
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Collector returning a fixed value, or failing when given `None`
pub struct StaticCollector {
    indicator: Indicator,
    value: Option<f64>,
    log: Option<Arc<Mutex<Vec<Indicator>>>>,
}

impl StaticCollector {
    pub fn new(indicator: Indicator, value: f64) -> Self {
        Self {
            indicator,
            value: Some(value),
            log: None,
        }
    }

    pub fn failing(indicator: Indicator) -> Self {
        Self {
            indicator,
            value: None,
            log: None,
        }
    }

    /// Builder: append the indicator to `log` when collected
    pub fn logging_to(mut self, log: Arc<Mutex<Vec<Indicator>>>) -> Self {
        self.log = Some(log);
        self
    }
}

impl Collector for StaticCollector {
    fn indicator(&self) -> Indicator {
        self.indicator
    }

    fn collect(&self, _fetcher: &dyn HttpFetcher) -> Result<f64, CollectionError> {
        if let Some(log) = &self.log {
            log.lock().unwrap().push(self.indicator);
        }
        self.value
            .ok_or_else(|| CollectionError::MissingField("mock".to_string()))
    }
}

/// Canned upstream payloads
pub mod fixtures {
    use super::MockFetcher;
    use crate::domain::Indicator;
    use crate::sources::collectors::default_url;
    use serde_json::{json, Value};

    pub const TRENDS_TOKEN: &str = "APP6_UEAAAAA-test";

    /// `chart.series` payload with the given `y` values
    pub fn series(values: &[f64]) -> Value {
        let points: Vec<Value> = values
            .iter()
            .enumerate()
            .map(|(i, y)| json!({"x": 1_600_000_000_000u64 + i as u64 * 86_400_000, "y": y}))
            .collect();
        json!({"chart": {"series": points}})
    }

    /// Logarithmic growth curve payload whose latest point has `price` and `upper`
    pub fn log_band(price: f64, upper: f64) -> Value {
        json!({"chart": {"series": [
            {"price": 1.0, "upper": 2.0},
            {"price": price, "upper": upper}
        ]}})
    }

    /// Binance funding rate payload
    pub fn funding_rate(rate: &str) -> Value {
        json!([{"symbol": "BTCUSDT", "fundingTime": 1_700_000_000_000u64, "fundingRate": rate}])
    }

    /// Fetcher answering both Google Trends requests
    pub fn trends_fetcher(values: &[u32]) -> MockFetcher {
        with_trends(MockFetcher::new(), values)
    }

    fn with_trends(fetcher: MockFetcher, values: &[u32]) -> MockFetcher {
        let base = default_url(Indicator::GoogleTrends);
        let explore = json!({"widgets": [
            {"id": "GEO_MAP", "token": "other", "request": {}},
            {"id": "TIMESERIES", "token": TRENDS_TOKEN, "request": {"time": "now 7-d"}}
        ]});
        let timeline: Vec<Value> = values
            .iter()
            .map(|v| json!({"time": "1700000000", "value": [v], "hasData": [true]}))
            .collect();
        let multiline = json!({"default": {"timelineData": timeline}});

        fetcher
            .with_text(&format!("{}/explore", base), format!(")]}}'\n{}", explore))
            .with_text(
                &format!("{}/widgetdata/multiline", base),
                format!(")]}}',\n{}", multiline),
            )
    }

    /// Fetcher answering every default source
    pub fn all_sources(
        mvrv: f64,
        puell: f64,
        (price, upper): (f64, f64),
        hodl: f64,
        funding: &str,
        trends: u32,
    ) -> MockFetcher {
        let fetcher = MockFetcher::new()
            .with_json(default_url(Indicator::MvrvZScore), series(&[1.0, mvrv]))
            .with_json(default_url(Indicator::PuellMultiple), series(&[0.5, puell]))
            .with_json(default_url(Indicator::LogUpperBand), log_band(price, upper))
            .with_json(
                default_url(Indicator::HodlWave30d),
                json!([{"t": 1, "30d_90d": 1.0}, {"t": 2, "30d_90d": hodl}]),
            )
            .with_json(default_url(Indicator::FundingRate), funding_rate(funding));
        with_trends(fetcher, &[10, trends])
    }
}
