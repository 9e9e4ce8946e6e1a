//! Indicator evaluator
//!
//! Runs every collector once and assembles the readings in declaration
//! order. A failing collector only marks its own indicator unavailable.

use crate::domain::{Indicator, IndicatorReading, Reading};
use crate::sources::{Collector, HttpFetcher};
use serde::Serialize;
use std::collections::BTreeMap;

/// A collector that failed this run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectorFailure {
    pub indicator: Indicator,
    pub error: String,
}

/// Output of one evaluation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    /// Readings in declaration order
    pub readings: Vec<IndicatorReading>,
    /// Collectors that failed, in declaration order
    pub failures: Vec<CollectorFailure>,
}

/// Service that turns collectors into ordered readings
pub struct IndicatorEvaluator {
    collectors: Vec<Box<dyn Collector>>,
}

impl IndicatorEvaluator {
    /// Create a new evaluator
    pub fn new(collectors: Vec<Box<dyn Collector>>) -> Self {
        Self { collectors }
    }

    /// Indicators this evaluator will produce, in declaration order
    pub fn indicators(&self) -> Vec<Indicator> {
        let mut indicators: Vec<_> = self.collectors.iter().map(|c| c.indicator()).collect();
        indicators.sort();
        indicators.dedup();
        indicators
    }

    /// Run all collectors sequentially
    pub fn evaluate(&self, fetcher: &dyn HttpFetcher) -> Evaluation {
        let mut readings: BTreeMap<Indicator, Reading> = BTreeMap::new();
        let mut failures: BTreeMap<Indicator, String> = BTreeMap::new();

        for collector in &self.collectors {
            let indicator = collector.indicator();
            let reading = match collector.collect(fetcher) {
                Ok(value) => {
                    log::debug!("{} = {}", indicator, value);
                    failures.remove(&indicator);
                    Reading::Value(value)
                }
                Err(e) => {
                    log::warn!("Failed to collect {}: {}", indicator, e);
                    failures.insert(indicator, e.to_string());
                    Reading::Unavailable
                }
            };

            if readings.insert(indicator, reading).is_some() {
                log::warn!("{} collected more than once, keeping the last reading", indicator);
            }
        }

        Evaluation {
            readings: readings
                .into_iter()
                .map(|(indicator, reading)| IndicatorReading::of(indicator, reading))
                .collect(),
            failures: failures
                .into_iter()
                .map(|(indicator, error)| CollectorFailure { indicator, error })
                .collect(),
        }
    }
}
