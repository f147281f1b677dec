//! Plex Refresher Core
//!
//! Transport-agnostic types, traits and refresh resolution for browsing a
//! media server's library and triggering metadata refreshes.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Section`, `Item`, `Season`, `Episode` and the tagged `Child`
//! - **Core Traits**: `LibraryBackend`, implemented by the upstream HTTP client
//! - **Refresh Resolution**: `resolve` and `Refresher`, which map a `Selection`
//!   onto a `RefreshTarget`
//! - **Error Handling**: Unified `RefresherError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use refresher_core::{resolve, Selection, SectionId};
//!
//! let target = resolve(Selection::Library {
//!     section_id: SectionId::new("1"),
//! })
//! .unwrap();
//! assert_eq!(target.section_id().as_str(), "1");
//! assert!(target.path().is_none());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod refresh;
pub mod traits;
pub mod types;

pub use error::{RefresherError, Result};
pub use refresh::{resolve, Refresher};
pub use traits::LibraryBackend;

pub use types::{
    Child, ChildListing, Episode, Item, ItemId, ItemKind, ItemListing, RefreshTarget, Season,
    Section, SectionId, SectionKind, Selection,
};
