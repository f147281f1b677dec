/// Server error types
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use plex_client::PlexClientError;
use refresher_core::RefresherError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    #[error("Invalid refresh target: {0}")]
    InvalidTarget(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Stable machine-readable name sent alongside the message
    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::Auth(_) => "auth_error",
            ServerError::NotFound(_) => "not_found",
            ServerError::Upstream(_) => "upstream_unavailable",
            ServerError::InvalidTarget(_) => "invalid_target",
            ServerError::BadRequest(_) => "bad_request",
            ServerError::Config(_) => "config_error",
            ServerError::Io(_) => "internal_error",
        }
    }
}

impl From<RefresherError> for ServerError {
    fn from(err: RefresherError) -> Self {
        match err {
            RefresherError::Auth(msg) => ServerError::Auth(msg),
            RefresherError::NotFound(msg) => ServerError::NotFound(msg),
            RefresherError::UpstreamUnavailable(msg) => ServerError::Upstream(msg),
            RefresherError::Config(msg) => ServerError::Config(msg),
            RefresherError::InvalidTarget(msg) => ServerError::InvalidTarget(msg),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl From<PlexClientError> for ServerError {
    fn from(err: PlexClientError) -> Self {
        RefresherError::from(err).into()
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, error_message) = match self {
            ServerError::Auth(msg) => {
                tracing::warn!("Upstream rejected token: {}", msg);
                (StatusCode::UNAUTHORIZED, msg)
            }
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::Upstream(msg) => {
                tracing::error!("Upstream error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
            ServerError::InvalidTarget(msg) | ServerError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "kind": kind,
        }));

        (status, body).into_response()
    }
}
