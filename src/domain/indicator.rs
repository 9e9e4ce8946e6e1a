//! Indicator domain types
//!
//! The closed set of tracked indicators and their readings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A tracked market indicator
///
/// Variant order is the display order of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// Market-value-to-realized-value Z-Score
    MvrvZScore,
    /// Miner revenue relative to its yearly average
    PuellMultiple,
    /// 1 when price is above the logarithmic growth curve upper band, else 0
    LogUpperBand,
    /// Supply share last moved 30d-90d ago
    #[serde(rename = "hodl_wave_30d")]
    HodlWave30d,
    /// Perpetual futures funding rate
    FundingRate,
    /// Search interest for "bitcoin"
    GoogleTrends,
}

impl Indicator {
    /// All indicators in declaration order
    pub const ALL: [Indicator; 6] = [
        Self::MvrvZScore,
        Self::PuellMultiple,
        Self::LogUpperBand,
        Self::HodlWave30d,
        Self::FundingRate,
        Self::GoogleTrends,
    ];

    /// Human-readable name shown on the dashboard and in alerts
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MvrvZScore => "MVRV Z-Score",
            Self::PuellMultiple => "Puell Multiple",
            Self::LogUpperBand => "Log Upper Band",
            Self::HodlWave30d => "30d HODL Wave",
            Self::FundingRate => "Funding Rate",
            Self::GoogleTrends => "Google Trends",
        }
    }

    /// Configuration key (snake_case)
    pub const fn key(&self) -> &'static str {
        match self {
            Self::MvrvZScore => "mvrv_z_score",
            Self::PuellMultiple => "puell_multiple",
            Self::LogUpperBand => "log_upper_band",
            Self::HodlWave30d => "hodl_wave_30d",
            Self::FundingRate => "funding_rate",
            Self::GoogleTrends => "google_trends",
        }
    }

    /// Look up an indicator by display name or config key
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|i| i.name() == name || i.key() == name)
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single indicator reading
///
/// `Unavailable` stands in for a collector that failed this run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Reading {
    /// Value reported by the source
    Value(f64),
    /// Source could not be read
    Unavailable,
}

impl Reading {
    /// Get the numeric value, if available
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Unavailable => None,
        }
    }

    /// Check whether the reading is available
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{}", v),
            Self::Unavailable => write!(f, "N/A"),
        }
    }
}

impl From<f64> for Reading {
    fn from(value: f64) -> Self {
        Self::Value(value)
    }
}

impl From<Option<f64>> for Reading {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Unavailable, Self::Value)
    }
}

impl From<Reading> for Option<f64> {
    fn from(reading: Reading) -> Self {
        reading.value()
    }
}

/// Named indicator reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReading {
    /// Indicator display name
    pub name: String,
    /// Reading for this run
    pub value: Reading,
}

impl IndicatorReading {
    /// Create a new reading
    pub fn new(name: impl Into<String>, value: impl Into<Reading>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a reading for a known indicator
    pub fn of(indicator: Indicator, value: impl Into<Reading>) -> Self {
        Self::new(indicator.name(), value)
    }
}

/// Encode `price > upper` as 1 or 0
///
/// Equal values encode as 0.
pub fn log_band_flag(price: f64, upper: f64) -> f64 {
    if price > upper {
        1.0
    } else {
        0.0
    }
}
