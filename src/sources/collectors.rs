//! Indicator collectors
//!
//! One collector per indicator. Each reads the latest point of its source
//! and reduces it to a single number.

use super::extract::{self, strip_xssi};
use super::traits::{Collector, FetchRequest, HttpFetcher};
use crate::config::{Credentials, IndicatorsConfig, SourceConfig};
use crate::config::env::GLASSNODE_API_KEY;
use crate::domain::{log_band_flag, Indicator};
use crate::error::{CollectionError, ConfigError};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

const BROWSER_AGENT: &str = "Mozilla/5.0";
const HODL_BAND: &str = "30d_90d";
const TRENDS_HOME: &str = "https://trends.google.com/";
const TRENDS_TIMESERIES: &str = "TIMESERIES";

/// Built-in endpoint for an indicator
pub fn default_url(indicator: Indicator) -> &'static str {
    match indicator {
        Indicator::MvrvZScore => "https://api.lookintobitcoin.com/indicators/mvrv-zscore",
        Indicator::PuellMultiple => "https://api.lookintobitcoin.com/indicators/puell-multiple",
        Indicator::LogUpperBand => {
            "https://api.lookintobitcoin.com/indicators/logarithmic-growth-curve"
        }
        Indicator::HodlWave30d => "https://api.glassnode.com/v1/metrics/indicators/hodl_waves",
        Indicator::FundingRate => "https://fapi.binance.com/fapi/v1/fundingRate",
        Indicator::GoogleTrends => "https://trends.google.com/trends/api",
    }
}

/// Built-in query parameters for an indicator
pub fn default_params(indicator: Indicator) -> &'static [(&'static str, &'static str)] {
    match indicator {
        Indicator::MvrvZScore | Indicator::PuellMultiple | Indicator::LogUpperBand => &[],
        Indicator::HodlWave30d => &[("a", "BTC"), ("i", "24h")],
        Indicator::FundingRate => &[("symbol", "BTCUSDT"), ("limit", "1")],
        Indicator::GoogleTrends => &[
            ("keyword", "bitcoin"),
            ("timeframe", "now 7-d"),
            ("geo", ""),
            ("hl", "en-US"),
            ("tz", "360"),
        ],
    }
}

/// Endpoint and parameters after applying config overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub url: String,
    pub params: BTreeMap<String, String>,
}

impl ResolvedSource {
    /// Overlay a config section on the built-in defaults
    pub fn resolve(indicator: Indicator, config: &SourceConfig) -> Self {
        let mut params: BTreeMap<String, String> = default_params(indicator)
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        params.extend(config.params.clone());

        Self {
            url: config
                .url
                .clone()
                .unwrap_or_else(|| default_url(indicator).to_string()),
            params,
        }
    }

    fn param(&self, key: &str) -> &str {
        self.params.get(key).map(String::as_str).unwrap_or_default()
    }

    fn request(&self) -> FetchRequest {
        FetchRequest::get(&self.url).queries(self.params.clone())
    }
}

/// Latest `y` of a `chart.series` time series
pub struct SeriesCollector {
    indicator: Indicator,
    source: ResolvedSource,
}

impl SeriesCollector {
    pub fn new(indicator: Indicator, source: ResolvedSource) -> Self {
        Self { indicator, source }
    }
}

impl Collector for SeriesCollector {
    fn indicator(&self) -> Indicator {
        self.indicator
    }

    fn collect(&self, fetcher: &dyn HttpFetcher) -> Result<f64, CollectionError> {
        let request = self.source.request().header("User-Agent", BROWSER_AGENT);
        let data = fetcher.get_json(&request)?;
        let latest = extract::last(&data, "chart.series")?;
        extract::number_at(latest, "y")
    }
}

/// Whether price closed above the logarithmic growth curve upper band
pub struct LogBandCollector {
    source: ResolvedSource,
}

impl LogBandCollector {
    pub fn new(source: ResolvedSource) -> Self {
        Self { source }
    }
}

impl Collector for LogBandCollector {
    fn indicator(&self) -> Indicator {
        Indicator::LogUpperBand
    }

    fn collect(&self, fetcher: &dyn HttpFetcher) -> Result<f64, CollectionError> {
        let data = fetcher.get_json(&self.source.request())?;
        let latest = extract::last(&data, "chart.series")?;
        let price = extract::number_at(latest, "price")?;
        let upper = extract::number_at(latest, "upper")?;
        log::debug!("Log growth curve: price={} upper={}", price, upper);
        Ok(log_band_flag(price, upper))
    }
}

/// Latest 30d-90d HODL wave share from Glassnode
pub struct HodlWaveCollector {
    source: ResolvedSource,
    api_key: String,
}

impl HodlWaveCollector {
    pub fn new(source: ResolvedSource, api_key: impl Into<String>) -> Self {
        Self {
            source,
            api_key: api_key.into(),
        }
    }
}

impl Collector for HodlWaveCollector {
    fn indicator(&self) -> Indicator {
        Indicator::HodlWave30d
    }

    fn collect(&self, fetcher: &dyn HttpFetcher) -> Result<f64, CollectionError> {
        let request = self.source.request().query("api_key", self.api_key.as_str());
        let data = fetcher.get_json(&request)?;
        let latest = extract::last(&data, "")?;

        // Glassnode nests multi-value metrics under "o"
        match latest.get(HODL_BAND) {
            Some(value) => extract::number(value, HODL_BAND),
            None => extract::number_at(latest, &format!("o.{}", HODL_BAND)),
        }
    }
}

/// Latest perpetual funding rate from Binance
pub struct FundingRateCollector {
    source: ResolvedSource,
}

impl FundingRateCollector {
    pub fn new(source: ResolvedSource) -> Self {
        Self { source }
    }
}

impl Collector for FundingRateCollector {
    fn indicator(&self) -> Indicator {
        Indicator::FundingRate
    }

    fn collect(&self, fetcher: &dyn HttpFetcher) -> Result<f64, CollectionError> {
        let data = fetcher.get_json(&self.source.request())?;
        let latest = extract::last(&data, "")?;
        extract::number_at(latest, "fundingRate")
    }
}

/// Latest Google Trends interest for a keyword
///
/// Two requests: the explore call hands out a token for the time-series
/// widget, which is then exchanged for the timeline. No request is started
/// once `deadline` has elapsed for the whole exchange.
pub struct TrendsCollector {
    source: ResolvedSource,
    deadline: Duration,
}

impl TrendsCollector {
    pub fn new(source: ResolvedSource, deadline: Duration) -> Self {
        Self { source, deadline }
    }

    fn check_deadline(&self, started: Instant, url: &str) -> Result<(), CollectionError> {
        if started.elapsed() >= self.deadline {
            return Err(CollectionError::Timeout {
                url: url.to_string(),
                secs: self.deadline.as_secs(),
            });
        }
        Ok(())
    }

    fn base(&self) -> &str {
        self.source.url.trim_end_matches('/')
    }

    fn locale_request(&self, url: String) -> FetchRequest {
        FetchRequest::get(url)
            .query("hl", self.source.param("hl"))
            .query("tz", self.source.param("tz"))
    }

    /// Explore request for the configured keyword and timeframe
    pub fn explore_request(&self) -> FetchRequest {
        let req = json!({
            "comparisonItem": [{
                "keyword": self.source.param("keyword"),
                "time": self.source.param("timeframe"),
                "geo": self.source.param("geo"),
            }],
            "category": 0,
            "property": "",
        });
        self.locale_request(format!("{}/explore", self.base()))
            .query("req", req.to_string())
    }

    fn fetch_google_json(
        &self,
        fetcher: &dyn HttpFetcher,
        request: &FetchRequest,
    ) -> Result<Value, CollectionError> {
        let body = fetcher.get_text(request)?;
        serde_json::from_str(strip_xssi(&body)).map_err(|e| CollectionError::MalformedResponse {
            url: request.url.clone(),
            message: e.to_string(),
        })
    }
}

impl Collector for TrendsCollector {
    fn indicator(&self) -> Indicator {
        Indicator::GoogleTrends
    }

    fn collect(&self, fetcher: &dyn HttpFetcher) -> Result<f64, CollectionError> {
        let started = Instant::now();

        // Google hands out the session cookie on the landing page
        if let Err(e) = fetcher.get_text(&FetchRequest::get(TRENDS_HOME)) {
            log::debug!("Trends cookie request failed: {}", e);
        }

        let explore_request = self.explore_request();
        self.check_deadline(started, &explore_request.url)?;
        let explore = self.fetch_google_json(fetcher, &explore_request)?;
        let widgets = extract::field(&explore, "widgets")?
            .as_array()
            .ok_or_else(|| CollectionError::MalformedField {
                field: "widgets".to_string(),
                value: "not an array".to_string(),
            })?;
        let widget = widgets
            .iter()
            .find(|w| w.get("id").and_then(Value::as_str) == Some(TRENDS_TIMESERIES))
            .ok_or_else(|| CollectionError::MissingField("widgets[TIMESERIES]".to_string()))?;

        let token = extract::field(widget, "token")?
            .as_str()
            .ok_or_else(|| CollectionError::MalformedField {
                field: "token".to_string(),
                value: widget["token"].to_string(),
            })?;
        let widget_req = extract::field(widget, "request")?;

        let request = self
            .locale_request(format!("{}/widgetdata/multiline", self.base()))
            .query("req", widget_req.to_string())
            .query("token", token);
        self.check_deadline(started, &request.url)?;
        let data = self.fetch_google_json(fetcher, &request)?;

        let timeline = extract::field(&data, "default.timelineData")?;
        if timeline.as_array().is_some_and(|points| points.is_empty()) {
            log::info!("Google Trends returned no data points, reporting 0");
            return Ok(0.0);
        }

        let latest = extract::last(timeline, "")?;
        let values = extract::field(latest, "value")?;
        let first = values
            .get(0)
            .ok_or_else(|| CollectionError::EmptySeries("value".to_string()))?;
        extract::number(first, "value[0]")
    }
}

/// Build collectors for every enabled indicator, in declaration order
///
/// The HODL wave source needs `GLASSNODE_API_KEY`; its absence is a
/// configuration error rather than a failed request later on. `timeout` is
/// also the overall bound for multi-request collectors.
pub fn build_collectors(
    indicators: &IndicatorsConfig,
    credentials: &Credentials,
    timeout: Duration,
) -> Result<Vec<Box<dyn Collector>>, ConfigError> {
    let mut collectors: Vec<Box<dyn Collector>> = Vec::new();

    for indicator in indicators.enabled() {
        let source = ResolvedSource::resolve(indicator, indicators.get(indicator));
        let collector: Box<dyn Collector> = match indicator {
            Indicator::MvrvZScore | Indicator::PuellMultiple => {
                Box::new(SeriesCollector::new(indicator, source))
            }
            Indicator::LogUpperBand => Box::new(LogBandCollector::new(source)),
            Indicator::HodlWave30d => {
                let key = credentials
                    .glassnode_api_key
                    .clone()
                    .ok_or_else(|| ConfigError::MissingField(GLASSNODE_API_KEY.to_string()))?;
                Box::new(HodlWaveCollector::new(source, key))
            }
            Indicator::FundingRate => Box::new(FundingRateCollector::new(source)),
            Indicator::GoogleTrends => Box::new(TrendsCollector::new(source, timeout)),
        };
        collectors.push(collector);
    }

    Ok(collectors)
}
