//! Error types for the Plex client.

use refresher_core::RefresherError;
use thiserror::Error;

/// Errors that can occur when talking to a Plex Media Server.
#[derive(Error, Debug)]
pub enum PlexClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an unexpected status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Token rejected by the server
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Unknown section or metadata id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid base URL or token
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl PlexClientError {
    /// Classify a transport error, separating connection problems from the rest.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            PlexClientError::ServerUnreachable(err.to_string())
        } else {
            PlexClientError::Request(err)
        }
    }
}

impl From<PlexClientError> for RefresherError {
    fn from(err: PlexClientError) -> Self {
        match err {
            PlexClientError::AuthFailed(msg) => RefresherError::Auth(msg),
            PlexClientError::NotFound(msg) => RefresherError::NotFound(msg),
            PlexClientError::InvalidConfig(msg) => RefresherError::Config(msg),
            PlexClientError::Request(_)
            | PlexClientError::ServerError { .. }
            | PlexClientError::ParseError(_)
            | PlexClientError::ServerUnreachable(_) => {
                RefresherError::UpstreamUnavailable(err.to_string())
            }
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, PlexClientError>;
