//! Unified error types for cyclewatch
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error while writing the report artifact
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Error from the messaging collaborator
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from metric collectors
///
/// A collection error is scoped to a single indicator; the pipeline records
/// the indicator as unavailable and carries on.
#[derive(Error, Debug)]
pub enum CollectionError {
    /// Source could not be reached (DNS, connect, TLS)
    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// Source did not answer within the configured timeout
    #[error("Request to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    /// Source answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Response body is not valid JSON
    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    /// Expected field is absent from the response
    #[error("Missing field '{0}' in response")]
    MissingField(String),

    /// Field is present but not numeric
    #[error("Field '{field}' is not numeric: {value}")]
    MalformedField { field: String, value: String },

    /// Series or array in the response is empty
    #[error("Empty series in response: {0}")]
    EmptySeries(String),
}

/// Errors from writing the report artifact
#[derive(Error, Debug)]
pub enum RenderError {
    /// Output file could not be written
    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report could not be serialized
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from the messaging collaborator
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Messaging endpoint could not be reached
    #[error("Messaging request failed: {0}")]
    Request(String),

    /// Messaging endpoint rejected the message
    #[error("Messaging provider rejected message (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Failed to parse config file
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required config field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
