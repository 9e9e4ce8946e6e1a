//! Alert dispatcher
//!
//! Sends at most one consolidated message per run. Whether alerting is
//! possible is decided once, at construction, from configuration and
//! credential presence.

use super::checker::Breach;
use super::message::AlertMessage;
use super::notifier::{Messenger, TwilioMessenger};
use crate::config::{AlertsConfig, CredentialPolicy, Credentials};
use crate::error::ConfigError;
use serde::Serialize;
use std::fmt;

/// Result of a dispatch attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// No indicator breached; nothing sent
    NothingToSend,
    /// Message delivered to the messaging channel
    Sent,
    /// Dry-run mode; message logged only
    DryRun,
    /// Alerting is disabled for this run
    Disabled(String),
    /// Messaging channel reported an error
    Failed(String),
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingToSend => write!(f, "no breaches, nothing sent"),
            Self::Sent => write!(f, "alert sent"),
            Self::DryRun => write!(f, "dry run, alert not sent"),
            Self::Disabled(reason) => write!(f, "alerts disabled ({})", reason),
            Self::Failed(err) => write!(f, "alert failed: {}", err),
        }
    }
}

struct Channel {
    messenger: Box<dyn Messenger>,
    from: String,
    to: String,
}

/// Alert dispatcher
pub struct AlertDispatcher {
    channel: Option<Channel>,
    disabled_reason: String,
    dry_run: bool,
}

impl AlertDispatcher {
    /// Create a dispatcher sending through `messenger`
    pub fn new(messenger: Box<dyn Messenger>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            channel: Some(Channel {
                messenger,
                from: from.into(),
                to: to.into(),
            }),
            disabled_reason: String::new(),
            dry_run: false,
        }
    }

    /// Create a dispatcher that never sends
    pub fn disabled(reason: impl Into<String>) -> Self {
        Self {
            channel: None,
            disabled_reason: reason.into(),
            dry_run: false,
        }
    }

    /// Builder: log messages instead of sending them
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Decide the alerting policy for this run
    ///
    /// With [`CredentialPolicy::Fail`], missing Twilio credentials are an
    /// error unless the run is a dry run.
    pub fn from_config(
        alerts: &AlertsConfig,
        credentials: &Credentials,
        dry_run: bool,
    ) -> Result<Self, ConfigError> {
        if !alerts.enabled {
            log::info!("SMS alerts disabled by configuration");
            return Ok(Self::disabled("disabled in configuration").with_dry_run(dry_run));
        }

        let Some(messaging) = credentials.messaging() else {
            let missing = credentials.missing_messaging().join(", ");
            return match alerts.on_missing_credentials {
                CredentialPolicy::Fail if !dry_run => Err(ConfigError::MissingField(missing)),
                _ => {
                    log::warn!("SMS alerts disabled: missing {}", missing);
                    Ok(Self::disabled(format!("missing {}", missing)).with_dry_run(dry_run))
                }
            };
        };

        let messenger =
            TwilioMessenger::new(&messaging).map_err(|e| ConfigError::InvalidValue {
                key: "alerts".to_string(),
                message: e.to_string(),
            })?;

        log::info!("SMS alerts enabled via {}", messenger.name());
        Ok(Self::new(Box::new(messenger), messaging.from, messaging.to).with_dry_run(dry_run))
    }

    /// Whether a real send can happen
    pub fn alerts_enabled(&self) -> bool {
        self.channel.is_some()
    }

    /// Send one consolidated alert for the breaches, if any
    ///
    /// Failures are logged and reported in the outcome, never raised.
    pub fn dispatch(&self, breaches: &[Breach]) -> DispatchOutcome {
        let Some(message) = AlertMessage::from_breaches(breaches) else {
            log::debug!("No thresholds breached");
            return DispatchOutcome::NothingToSend;
        };

        let Some(channel) = &self.channel else {
            log::info!(
                "{} breach(es) not sent: alerts {}",
                breaches.len(),
                self.disabled_reason
            );
            log::debug!("Unsent alert:\n{}", message);
            return DispatchOutcome::Disabled(self.disabled_reason.clone());
        };

        if self.dry_run {
            log::info!("Dry run, not sending alert:\n{}", message);
            return DispatchOutcome::DryRun;
        }

        match channel
            .messenger
            .send(&channel.from, &channel.to, message.body())
        {
            Ok(()) => {
                log::info!(
                    "Sent alert for {} breach(es) via {}",
                    breaches.len(),
                    channel.messenger.name()
                );
                DispatchOutcome::Sent
            }
            Err(e) => {
                log::error!("Failed to send alert via {}: {}", channel.messenger.name(), e);
                DispatchOutcome::Failed(e.to_string())
            }
        }
    }
}
