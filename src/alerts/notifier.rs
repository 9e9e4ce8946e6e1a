//! Messaging channels
//!
//! The dispatcher only depends on the three-argument [`Messenger`] contract;
//! Twilio is the production implementation.

use crate::config::MessagingCredentials;
use crate::error::DispatchError;
use reqwest::blocking::Client;
use std::time::Duration;

const TWILIO_API: &str = "https://api.twilio.com/2010-04-01";
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Text-message channel
pub trait Messenger {
    /// Send one text message
    fn send(&self, from: &str, to: &str, body: &str) -> Result<(), DispatchError>;

    /// Channel name for identification
    fn name(&self) -> &str;
}

/// Twilio Programmable Messaging client
pub struct TwilioMessenger {
    client: Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
}

impl TwilioMessenger {
    /// Create a messenger for the given account
    pub fn new(credentials: &MessagingCredentials) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| DispatchError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: TWILIO_API.to_string(),
            account_sid: credentials.account_sid.clone(),
            auth_token: credentials.auth_token.clone(),
        })
    }

    /// Builder: point at a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Messages resource for the account
    pub fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            self.base_url.trim_end_matches('/'),
            self.account_sid
        )
    }
}

impl Messenger for TwilioMessenger {
    fn send(&self, from: &str, to: &str, body: &str) -> Result<(), DispatchError> {
        let url = self.messages_url();
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("Body", body), ("From", from), ("To", to)])
            .send()
            .map_err(|e| DispatchError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().unwrap_or_default();
        Err(DispatchError::Rejected {
            status: status.as_u16(),
            body,
        })
    }

    fn name(&self) -> &str {
        "twilio"
    }
}
