//! Error types for shortcut definition operations

use std::fmt;

use thiserror::Error;

use crate::models::{ActionType, ParameterField};

/// Errors that can occur while parsing a stored key combination
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("Empty key combination")]
    Empty,

    #[error("Empty key segment in combination: {0}")]
    EmptySegment(String),

    #[error("Duplicate key {token} in combination: {combination}")]
    DuplicateKey { token: String, combination: String },
}

/// Local, pre-submission validation failures
///
/// These never reach the lifecycle store; the caller reports them directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No key combination captured")]
    EmptyCombination,

    #[error("Shortcut name is empty")]
    EmptyName,

    #[error("Shortcut has no action")]
    NoActions,

    #[error("Missing required parameters for {action_type}: {}", FieldList(.missing))]
    MissingParameters {
        action_type: ActionType,
        missing: Vec<ParameterField>,
    },

    #[error("Invalid value for {field}: {value}")]
    InvalidParameterValue {
        field: ParameterField,
        value: String,
    },
}

/// Every reason a draft was refused, reported together
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Shortcut cannot be submitted: {}", ErrorList(.errors))]
pub struct SubmissionRejected {
    pub errors: Vec<ValidationError>,
}

struct ErrorList<'a>(&'a [ValidationError]);

impl fmt::Display for ErrorList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

struct FieldList<'a>(&'a [ParameterField]);

impl fmt::Display for FieldList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, field) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            f.write_str(field.as_str())?;
        }
        Ok(())
    }
}

/// Failures surfaced by a remote shortcut gateway
///
/// The store does not branch on the variant; it only forwards the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Serialization(String),

    #[error("{0}")]
    Rejected(String),
}

impl RemoteError {
    /// Message forwarded into the store's error slot
    pub fn message(&self) -> &str {
        match self {
            RemoteError::Transport(msg)
            | RemoteError::Serialization(msg)
            | RemoteError::Rejected(msg) => msg,
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::Serialization(err.to_string())
    }
}

/// Configuration result type
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
