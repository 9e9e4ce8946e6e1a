//! Service layer for the dashboard run
//!
//! Services encapsulate indicator evaluation and the single-pass pipeline
//! that ties collection, rendering and alerting together.

pub mod evaluator;
pub mod pipeline;

pub use evaluator::{CollectorFailure, Evaluation, IndicatorEvaluator};
pub use pipeline::{Outputs, Pipeline, RunSummary};
