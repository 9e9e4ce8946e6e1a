//! Threshold checker
//!
//! Compares report readings against their ceilings.

use crate::domain::{exceeds, Report};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An indicator reading above its threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breach {
    /// Indicator display name
    pub name: String,
    /// Reading that breached
    pub value: f64,
    /// Ceiling that was exceeded
    pub threshold: f64,
}

impl fmt::Display for Breach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

/// Breaching rows of a report, in report order
///
/// Rows without a threshold and unavailable readings never breach.
pub fn breaches(report: &Report) -> Vec<Breach> {
    report
        .rows()
        .iter()
        .filter_map(|row| {
            let value = row.reading.value()?;
            let threshold = row.threshold?;
            exceeds(value, threshold).then(|| Breach {
                name: row.name.clone(),
                value,
                threshold,
            })
        })
        .collect()
}
