//! Main Plex client.

use crate::error::{PlexClientError, Result};
use crate::library::LibraryClient;
use crate::types::PlexConfig;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Client for the library endpoints of a Plex Media Server.
///
/// The base URL and token are fixed at construction. The client holds no
/// other state and is cheap to share behind an `Arc`.
///
/// # Example
///
/// ```ignore
/// use plex_client::{PlexClient, PlexConfig};
///
/// let client = PlexClient::new(PlexConfig::new("http://plex.local:32400", "token"))?;
/// let sections = client.library().list_sections().await?;
/// println!("Found {} sections", sections.len());
/// ```
pub struct PlexClient {
    http: Client,
    url: String,
    token: String,
}

impl PlexClient {
    /// Create a new client with the given configuration.
    pub fn new(config: PlexConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(PlexClientError::InvalidConfig("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim().trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PlexClientError::InvalidConfig(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&url).map_err(|e| PlexClientError::InvalidConfig(e.to_string()))?;

        if config.token.trim().is_empty() {
            return Err(PlexClientError::InvalidConfig(
                "Token cannot be empty".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("PlexRefresher/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(PlexClientError::Request)?;

        debug!(url = %url, "Created Plex client");

        Ok(Self {
            http,
            url,
            token: config.token,
        })
    }

    /// Get the normalized server URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get a library client for browse and refresh operations.
    pub fn library(&self) -> LibraryClient<'_> {
        LibraryClient::new(&self.http, &self.url, &self.token)
    }
}

impl std::fmt::Debug for PlexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlexClient")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}
