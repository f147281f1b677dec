/// Core error types for Plex Refresher
use thiserror::Error;

/// Result type alias using `RefresherError`
pub type Result<T> = std::result::Result<T, RefresherError>;

/// Errors surfaced by browse and refresh operations.
///
/// Every variant is handed to the caller unchanged. Nothing is retried: a
/// repeated refresh would queue a second scan upstream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefresherError {
    /// The upstream rejected the token
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Unknown section or item id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network failure, timeout or an unexpected upstream reply
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A selection that cannot be turned into a refresh call
    #[error("Invalid refresh target: {0}")]
    InvalidTarget(String),
}

impl RefresherError {
    /// Create a not-found error for an entity
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{} {} not found", entity, id))
    }

    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Auth(_) => "auth_error",
            Self::NotFound(_) => "not_found",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::Config(_) => "config_error",
            Self::InvalidTarget(_) => "invalid_target",
        }
    }
}
