//! Threshold table
//!
//! Static mapping of indicator name to alert ceiling.

use super::indicator::Indicator;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Check whether a value breaches a threshold
///
/// Strictly greater-than: a value equal to the threshold does not breach.
#[inline]
pub fn exceeds(value: f64, threshold: f64) -> bool {
    value > threshold
}

/// Immutable name to ceiling mapping
///
/// Indicators without an entry are never eligible for alerting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdTable(BTreeMap<String, f64>);

impl ThresholdTable {
    /// Create an empty table
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder: add an entry
    pub fn with(mut self, name: impl Into<String>, ceiling: f64) -> Self {
        self.0.insert(name.into(), ceiling);
        self
    }

    /// Get the ceiling for an indicator name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Names that do not belong to any known indicator
    pub fn unknown_names(&self) -> Vec<&str> {
        self.0
            .keys()
            .filter(|k| Indicator::from_name(k).is_none())
            .map(String::as_str)
            .collect()
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::empty()
            .with(Indicator::MvrvZScore.name(), 6.5)
            .with(Indicator::PuellMultiple.name(), 4.0)
            .with(Indicator::LogUpperBand.name(), 1.0)
            .with(Indicator::HodlWave30d.name(), 15.0)
            .with(Indicator::FundingRate.name(), 0.10)
            .with(Indicator::GoogleTrends.name(), 80.0)
    }
}

impl FromIterator<(String, f64)> for ThresholdTable {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
