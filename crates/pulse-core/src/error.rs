//! Error types for pulse-core.

use thiserror::Error;

/// Result type alias using pulse-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for activity lookups
#[derive(Error, Debug)]
pub enum Error {
    // Transport errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} API error {status}: {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to decode {service} response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },

    // Summarization errors
    #[error("Summarizer error: {0}")]
    Summarizer(String),

    // Directory errors
    #[error("Team directory error: {0}")]
    Directory(String),

    #[error("Invalid team directory file: {0}")]
    Toml(#[from] toml::de::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a non-success API response
    pub fn api(service: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            service,
            status,
            body: body.into(),
        }
    }

    /// Create an error from a response body that could not be decoded
    pub fn decode(service: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            service,
            message: message.into(),
        }
    }
}
