//! Error handling and custom error types
//!
//! `Error` covers process-level failures (configuration, HTTP client setup, server). `ApiError`
//! describes a failed remote generation call and is recovered into a displayable
//! outcome rather than propagated.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure of one outbound call to a generation service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The service answered with something other than `200 OK`.
    #[error("{status} - {body}")]
    Status { status: u16, body: String },

    /// Connection, timeout, or other transport failure before a status arrived.
    #[error("request failed: {0}")]
    Transport(String),

    /// A `200 OK` whose body lacks the expected shape.
    #[error("unexpected response: {0}")]
    MalformedResponse(String),

    #[error("could not decode image: {0}")]
    UndecodableImage(String),
}

impl ApiError {
    /// HTTP status code, when the failure came from a non-200 response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}
