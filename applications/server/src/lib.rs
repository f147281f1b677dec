//! Plex Refresher Library
//!
//! Web front-end for browsing a Plex server's library hierarchy and
//! triggering metadata refreshes.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod lookup;
pub mod router;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use router::create_router;
pub use state::AppState;
