//! Report domain types
//!
//! A report is the ordered snapshot of one run's readings and their thresholds.

use super::indicator::{IndicatorReading, Reading};
use super::threshold::ThresholdTable;
use serde::{Deserialize, Serialize};

/// One report row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Indicator display name
    pub name: String,
    /// Reading for this run
    pub reading: Reading,
    /// Alert ceiling, if the indicator has one
    pub threshold: Option<f64>,
}

/// Ordered readings with thresholds attached
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    rows: Vec<ReportRow>,
}

impl Report {
    /// Build a report, keeping reading order
    pub fn new(readings: Vec<IndicatorReading>, thresholds: &ThresholdTable) -> Self {
        let rows = readings
            .into_iter()
            .map(|r| ReportRow {
                threshold: thresholds.get(&r.name),
                name: r.name,
                reading: r.value,
            })
            .collect();
        Self { rows }
    }

    /// Rows in display order
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the report has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows whose collector failed
    pub fn unavailable_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| !r.reading.is_available())
            .count()
    }
}
