//! API error types

use thiserror::Error;

use crate::models::EntityKind;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("Response for {entity} has no total item count")]
    MissingTotal { entity: EntityKind },

    #[error("Invalid response body for {entity}: {reason}")]
    InvalidBody { entity: EntityKind, reason: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Short message for the status bar and error dialogs
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http(e) if e.is_timeout() => "The server took too long to respond".to_string(),
            ApiError::Http(e) if e.is_connect() => "Could not reach the server".to_string(),
            ApiError::Status { status, message } if message.is_empty() => {
                format!("Server returned status {}", status)
            }
            ApiError::Status { status, message } => format!("{} (status {})", message, status),
            other => other.to_string(),
        }
    }
}
