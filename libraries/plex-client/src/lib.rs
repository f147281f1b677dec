//! Plex Client
//!
//! HTTP client for the four Plex Media Server library endpoints used by
//! Plex Refresher.
//!
//! # Features
//!
//! - **Sections**: `GET /library/sections`
//! - **Items**: `GET /library/sections/{id}/all`
//! - **Children**: `GET /library/metadata/{id}/children` (seasons or episodes)
//! - **Refresh**: `GET /library/sections/{id}/refresh`, optionally scoped by `path`
//!
//! Every request carries the configured `X-Plex-Token`.
//!
//! # Example
//!
//! ```ignore
//! use plex_client::{PlexClient, PlexConfig};
//! use refresher_core::SectionId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PlexClient::new(PlexConfig::new("http://plex.local:32400", "token"))?;
//!
//!     for section in client.library().list_sections().await? {
//!         println!("{} - {}", section.id, section.title);
//!     }
//!
//!     // Rescan the whole "Movies" library
//!     client
//!         .library()
//!         .trigger_refresh(&SectionId::new("1"), None)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod backend;
mod client;
mod error;
mod library;
mod types;

pub use client::PlexClient;
pub use error::{PlexClientError, Result};
pub use library::LibraryClient;
pub use types::PlexConfig;
