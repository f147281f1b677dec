/// Server configuration
use crate::error::{Result, ServerError};
use plex_client::PlexConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub plex: PlexSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the web UI (`index.html`)
    #[serde(default = "default_web_dir")]
    pub web_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlexSettings {
    /// Base URL of the Plex server
    #[serde(default)]
    pub url: String,

    /// `X-Plex-Token` attached to every upstream request
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from the given file (if it exists) and the environment.
    ///
    /// `REFRESHER__SECTION__KEY` variables override the file, and `PLEX_URL` /
    /// `PLEX_TOKEN` override both.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut settings = config::Config::builder();

        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("REFRESHER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = settings
            .set_override_option("plex.url", non_empty_env("PLEX_URL"))
            .and_then(|s| s.set_override_option("plex.token", non_empty_env("PLEX_TOKEN")))
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration. A missing URL or token is fatal at startup.
    pub fn validate(&self) -> Result<()> {
        if self.plex.url.trim().is_empty() {
            return Err(ServerError::Config(
                "Plex URL is required (set PLEX_URL)".to_string(),
            ));
        }

        if self.plex.token.trim().is_empty() {
            return Err(ServerError::Config(
                "Plex token is required (set PLEX_TOKEN)".to_string(),
            ));
        }

        if self.plex.timeout_secs == 0 {
            return Err(ServerError::Config(
                "plex.timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Client configuration for the upstream server
    pub fn plex_config(&self) -> PlexConfig {
        PlexConfig::new(self.plex.url.clone(), self.plex.token.clone())
            .with_timeout(Duration::from_secs(self.plex.timeout_secs))
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_web_dir() -> PathBuf {
    PathBuf::from("./web")
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_dir: default_web_dir(),
        }
    }
}

impl Default for PlexSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
