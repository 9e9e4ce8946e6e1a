//! Domain models for cyclewatch
//!
//! Indicators, readings, thresholds and the per-run report.

pub mod indicator;
pub mod report;
pub mod threshold;

pub use indicator::{log_band_flag, Indicator, IndicatorReading, Reading};
pub use report::{Report, ReportRow};
pub use threshold::{exceeds, ThresholdTable};
