//! Environment-supplied secrets
//!
//! Secrets are read once at process entry and passed down explicitly.
//! Empty variables count as absent.

use std::fmt;

/// Twilio account SID
pub const TWILIO_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
/// Twilio auth token
pub const TWILIO_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";
/// Sender phone number
pub const TWILIO_FROM_NUMBER: &str = "TWILIO_FROM_NUMBER";
/// Recipient phone number
pub const PHONE_NUMBER: &str = "PHONE_NUMBER";
/// Glassnode API key
pub const GLASSNODE_API_KEY: &str = "GLASSNODE_API_KEY";

/// Complete set of messaging credentials
#[derive(Clone, PartialEq, Eq)]
pub struct MessagingCredentials {
    pub account_sid: String,
    pub auth_token: String,
    pub from: String,
    pub to: String,
}

impl fmt::Debug for MessagingCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessagingCredentials")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

/// Secrets loaded from the environment
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    pub from_number: Option<String>,
    pub to_number: Option<String>,
    pub glassnode_api_key: Option<String>,
}

impl Credentials {
    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            account_sid: get(TWILIO_ACCOUNT_SID),
            auth_token: get(TWILIO_AUTH_TOKEN),
            from_number: get(TWILIO_FROM_NUMBER),
            to_number: get(PHONE_NUMBER),
            glassnode_api_key: get(GLASSNODE_API_KEY),
        }
    }

    /// Messaging credentials, if all four are present
    pub fn messaging(&self) -> Option<MessagingCredentials> {
        Some(MessagingCredentials {
            account_sid: self.account_sid.clone()?,
            auth_token: self.auth_token.clone()?,
            from: self.from_number.clone()?,
            to: self.to_number.clone()?,
        })
    }

    /// Names of the messaging variables that are not set
    pub fn missing_messaging(&self) -> Vec<&'static str> {
        [
            (TWILIO_ACCOUNT_SID, &self.account_sid),
            (TWILIO_AUTH_TOKEN, &self.auth_token),
            (TWILIO_FROM_NUMBER, &self.from_number),
            (PHONE_NUMBER, &self.to_number),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_none())
        .map(|(k, _)| k)
        .collect()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |v: &Option<String>| v.as_ref().map(|_| "<set>");
        f.debug_struct("Credentials")
            .field("account_sid", &mask(&self.account_sid))
            .field("auth_token", &mask(&self.auth_token))
            .field("from_number", &mask(&self.from_number))
            .field("to_number", &mask(&self.to_number))
            .field("glassnode_api_key", &mask(&self.glassnode_api_key))
            .finish()
    }
}
