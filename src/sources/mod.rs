//! Metric sources
//!
//! Trait-based HTTP access and the per-indicator collectors built on it.

pub mod collectors;
pub mod extract;
pub mod http;
pub mod traits;

pub use collectors::{build_collectors, ResolvedSource};
pub use http::HttpClient;
pub use traits::{Collector, FetchRequest, HttpFetcher};
