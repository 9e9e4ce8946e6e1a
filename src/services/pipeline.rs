//! Dashboard pipeline
//!
//! One pass: collect, render and write the dashboard, check thresholds,
//! then dispatch. The dashboard is written before any alert is attempted.

use super::evaluator::{CollectorFailure, IndicatorEvaluator};
use crate::alerts::{self, AlertDispatcher, Breach, DispatchOutcome};
use crate::config::{Config, Credentials};
use crate::domain::{Report, ThresholdTable};
use crate::error::{AppError, ConfigError};
use crate::render::{self, Snapshot};
use crate::sources::{build_collectors, HttpFetcher};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub report: Report,
    pub breaches: Vec<Breach>,
    pub failures: Vec<CollectorFailure>,
    pub output_path: PathBuf,
    pub dispatch: DispatchOutcome,
}

/// Where the run writes its artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outputs {
    /// HTML dashboard, overwritten each run
    pub html: PathBuf,
    /// Optional JSON snapshot
    pub json: Option<PathBuf>,
}

/// The single-pass dashboard pipeline
pub struct Pipeline {
    evaluator: IndicatorEvaluator,
    thresholds: ThresholdTable,
    dispatcher: AlertDispatcher,
    outputs: Outputs,
}

impl Pipeline {
    /// Create a pipeline from its parts
    pub fn new(
        evaluator: IndicatorEvaluator,
        thresholds: ThresholdTable,
        dispatcher: AlertDispatcher,
        outputs: Outputs,
    ) -> Self {
        Self {
            evaluator,
            thresholds,
            dispatcher,
            outputs,
        }
    }

    /// Wire a pipeline from configuration and environment secrets
    pub fn from_config(config: &Config, credentials: &Credentials) -> Result<Self, ConfigError> {
        let collectors = build_collectors(
            &config.indicators,
            credentials,
            Duration::from_secs(config.general.timeout_secs),
        )?;
        let dispatcher =
            AlertDispatcher::from_config(&config.alerts, credentials, config.general.dry_run)?;

        Ok(Self::new(
            IndicatorEvaluator::new(collectors),
            config.thresholds.clone(),
            dispatcher,
            Outputs {
                html: config.general.output_path.clone(),
                json: config.general.json_output_path.clone(),
            },
        ))
    }

    /// Whether breaches would actually be sent
    pub fn alerts_enabled(&self) -> bool {
        self.dispatcher.alerts_enabled()
    }

    /// Run the pipeline once
    ///
    /// Only a failure to write the HTML dashboard aborts the run. The JSON
    /// snapshot is best effort.
    pub fn run(
        &self,
        fetcher: &dyn HttpFetcher,
        generated_at: DateTime<Utc>,
    ) -> Result<RunSummary, AppError> {
        log::info!(
            "Collecting {} indicator(s)",
            self.evaluator.indicators().len()
        );
        let evaluation = self.evaluator.evaluate(fetcher);
        if !evaluation.failures.is_empty() {
            log::warn!(
                "{} indicator(s) unavailable, rendering partial report",
                evaluation.failures.len()
            );
        }

        let report = Report::new(evaluation.readings, &self.thresholds);
        let breaches = alerts::breaches(&report);

        let html = render::render_html(&report, generated_at);
        render::write_artifact(&self.outputs.html, &html)?;

        if let Some(json_path) = &self.outputs.json {
            let written = Snapshot::new(&report, &breaches, generated_at)
                .to_json()
                .and_then(|json| render::write_artifact(json_path, &json));
            if let Err(e) = written {
                log::warn!("Skipping JSON snapshot: {}", e);
            }
        }

        let dispatch = self.dispatcher.dispatch(&breaches);

        Ok(RunSummary {
            generated_at,
            report,
            breaches,
            failures: evaluation.failures,
            output_path: self.outputs.html.clone(),
            dispatch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Indicator, Reading};
    use crate::mock::{fixtures, FailingMessenger, MockFetcher, MockResponse, RecordingMessenger};
    use crate::sources::collectors::default_url;
    use crate::sources::http::DEFAULT_TIMEOUT;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap()
    }

    fn credentials() -> Credentials {
        Credentials {
            glassnode_api_key: Some("gn-key".to_string()),
            ..Credentials::default()
        }
    }

    fn collectors() -> Vec<Box<dyn crate::sources::Collector>> {
        build_collectors(&Default::default(), &credentials(), DEFAULT_TIMEOUT).unwrap()
    }

    fn pipeline(dir: &std::path::Path, messenger: RecordingMessenger) -> Pipeline {
        let mut config = Config::default();
        config.general.output_path = dir.join("index.html");
        config.general.json_output_path = Some(dir.join("report.json"));

        Pipeline::new(
            IndicatorEvaluator::new(collectors()),
            config.thresholds.clone(),
            AlertDispatcher::new(Box::new(messenger), "+1", "+2"),
            Outputs {
                html: config.general.output_path.clone(),
                json: config.general.json_output_path.clone(),
            },
        )
    }

    #[test]
    fn test_quiet_run_writes_report_without_alert() {
        let dir = tempfile::tempdir().unwrap();
        let messenger = RecordingMessenger::new();
        let fetcher = fixtures::all_sources(2.1, 1.3, (60_000.0, 150_000.0), 12.0, "0.0001", 45);

        let summary = pipeline(dir.path(), messenger.clone())
            .run(&fetcher, instant())
            .unwrap();

        assert_eq!(summary.report.len(), 6);
        assert!(summary.failures.is_empty());
        assert!(summary.breaches.is_empty());
        assert_eq!(summary.dispatch, DispatchOutcome::NothingToSend);
        assert_eq!(messenger.call_count(), 0);

        let html = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(html.contains("<tr><td>MVRV Z-Score</td><td>2.1</td><td>6.5</td></tr>"));
        assert!(html.contains("<tr><td>Google Trends</td><td>45</td><td>80</td></tr>"));
        assert!(html.contains("Last updated: 2025-06-01 12:30 UTC"));
        assert!(dir.path().join("report.json").exists());
    }

    #[test]
    fn test_breaching_run_sends_one_alert() {
        let dir = tempfile::tempdir().unwrap();
        let messenger = RecordingMessenger::new();
        let fetcher = fixtures::all_sources(7.5, 4.0, (120_000.0, 100_000.0), 16.5, "0.0003", 92);

        let summary = pipeline(dir.path(), messenger.clone())
            .run(&fetcher, instant())
            .unwrap();

        // Puell equals its threshold and Log Upper Band equals 1: neither breaches
        let names: Vec<_> = summary.breaches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["MVRV Z-Score", "30d HODL Wave", "Google Trends"]);
        assert_eq!(summary.dispatch, DispatchOutcome::Sent);

        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].body,
            "⚠️ Bitcoin Indicator Alert:\nMVRV Z-Score = 7.5\n30d HODL Wave = 16.5\nGoogle Trends = 92"
        );
    }

    #[test]
    fn test_partial_outage_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let messenger = RecordingMessenger::new();
        let fetcher = fixtures::all_sources(8.0, 1.0, (1.0, 2.0), 1.0, "0.0001", 10)
            .with_response(default_url(Indicator::FundingRate), MockResponse::Timeout)
            .with_response(default_url(Indicator::PuellMultiple), MockResponse::Status(503));

        let summary = pipeline(dir.path(), messenger.clone())
            .run(&fetcher, instant())
            .unwrap();

        assert_eq!(summary.failures.len(), 2);
        assert_eq!(summary.report.unavailable_count(), 2);
        let funding = summary
            .report
            .rows()
            .iter()
            .find(|r| r.name == "Funding Rate")
            .unwrap();
        assert_eq!(funding.reading, Reading::Unavailable);

        let html = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(html.contains("<tr><td>Funding Rate</td><td>N/A</td><td>0.1</td></tr>"));
        assert_eq!(messenger.call_count(), 1);
    }

    #[test]
    fn test_total_outage_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let messenger = RecordingMessenger::new();

        let summary = pipeline(dir.path(), messenger.clone())
            .run(&MockFetcher::new(), instant())
            .unwrap();

        assert_eq!(summary.report.unavailable_count(), 6);
        assert!(summary.breaches.is_empty());
        assert_eq!(messenger.call_count(), 0);
        assert!(dir.path().join("index.html").exists());
    }

    #[test]
    fn test_dispatch_failure_does_not_fail_run() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fixtures::all_sources(9.0, 1.0, (1.0, 2.0), 1.0, "0.0001", 10);

        let pipeline = Pipeline::new(
            IndicatorEvaluator::new(collectors()),
            ThresholdTable::default(),
            AlertDispatcher::new(Box::new(FailingMessenger), "+1", "+2"),
            Outputs {
                html: dir.path().join("index.html"),
                json: None,
            },
        );

        let summary = pipeline.run(&fetcher, instant()).unwrap();
        assert!(matches!(summary.dispatch, DispatchOutcome::Failed(_)));
        assert!(dir.path().join("index.html").exists());
    }

    #[test]
    fn test_unwritable_output_is_fatal_and_skips_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file").unwrap();
        let messenger = RecordingMessenger::new();
        let fetcher = fixtures::all_sources(9.0, 1.0, (1.0, 2.0), 1.0, "0.0001", 10);

        let pipeline = Pipeline::new(
            IndicatorEvaluator::new(collectors()),
            ThresholdTable::default(),
            AlertDispatcher::new(Box::new(messenger.clone()), "+1", "+2"),
            Outputs {
                html: blocker.join("index.html"),
                json: None,
            },
        );

        let result = pipeline.run(&fetcher, instant());
        assert!(matches!(result, Err(AppError::Render(_))));
        assert_eq!(messenger.call_count(), 0);
    }

    #[test]
    fn test_snapshot_failure_still_dispatches() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file").unwrap();
        let messenger = RecordingMessenger::new();
        let fetcher = fixtures::all_sources(9.0, 1.0, (1.0, 2.0), 1.0, "0.0001", 10);

        let pipeline = Pipeline::new(
            IndicatorEvaluator::new(collectors()),
            ThresholdTable::default(),
            AlertDispatcher::new(Box::new(messenger.clone()), "+1", "+2"),
            Outputs {
                html: dir.path().join("index.html"),
                json: Some(blocker.join("report.json")),
            },
        );

        let summary = pipeline.run(&fetcher, instant()).unwrap();
        assert!(dir.path().join("index.html").exists());
        assert!(!blocker.join("report.json").exists());
        assert_eq!(summary.dispatch, DispatchOutcome::Sent);
        assert_eq!(messenger.call_count(), 1);
    }

    #[test]
    fn test_from_config_requires_glassnode_key() {
        let result = Pipeline::from_config(&Config::default(), &Credentials::default());
        assert!(matches!(result, Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_from_config_alerts_skipped_without_credentials() {
        let pipeline = Pipeline::from_config(&Config::default(), &credentials()).unwrap();
        assert!(!pipeline.alerts_enabled());
    }
}
