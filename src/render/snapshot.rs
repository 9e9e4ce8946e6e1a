//! Machine-readable report snapshot

use crate::alerts::Breach;
use crate::domain::{Report, ReportRow};
use crate::error::RenderError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// JSON view of one run
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub generated_at: DateTime<Utc>,
    pub indicators: &'a [ReportRow],
    pub breaches: &'a [Breach],
}

impl<'a> Snapshot<'a> {
    pub fn new(report: &'a Report, breaches: &'a [Breach], generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            indicators: report.rows(),
            breaches,
        }
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
