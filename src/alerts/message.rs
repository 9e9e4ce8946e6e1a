//! Alert message formatting

use super::checker::Breach;
use std::fmt;

/// First line of every alert
pub const ALERT_HEADER: &str = "⚠️ Bitcoin Indicator Alert:";

/// A consolidated alert for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage(String);

impl AlertMessage {
    /// Build the message, or `None` when nothing breached
    pub fn from_breaches(breaches: &[Breach]) -> Option<Self> {
        if breaches.is_empty() {
            return None;
        }

        let mut body = String::from(ALERT_HEADER);
        for breach in breaches {
            body.push('\n');
            body.push_str(&breach.to_string());
        }
        Some(Self(body))
    }

    /// Message text
    pub fn body(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlertMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
