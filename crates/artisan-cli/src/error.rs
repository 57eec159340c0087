// CLI errors and their user-facing messages

use artisan_shortcuts::{ConfigError, SubmissionRejected};
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Rejected(#[from] SubmissionRejected),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!(
                    "Invalid argument: {}\n\nRun 'artisan --help' for usage information.",
                    message
                )
            }
            CliError::Config(msg) => {
                format!(
                    "Configuration error: {}\n\nCheck the file passed with --config or the ARTISAN_* variables.",
                    msg
                )
            }
            CliError::Rejected(rejected) => {
                let mut message = String::from("Shortcut cannot be submitted:");
                for err in &rejected.errors {
                    message.push_str("\n  - ");
                    message.push_str(&err.to_string());
                }
                message
            }
            CliError::Serialization(e) => format!("Could not encode payload: {}", e),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;
