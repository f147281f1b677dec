/// Core traits for Plex Refresher
use crate::error::Result;
use crate::types::{ChildListing, ItemId, ItemListing, Section, SectionId};
use async_trait::async_trait;

/// Read and refresh access to a media server's library.
///
/// Implementations perform exactly one upstream request per call and keep no
/// state between calls.
#[async_trait]
pub trait LibraryBackend: Send + Sync {
    /// List library sections in server order
    async fn list_sections(&self) -> Result<Vec<Section>>;

    /// List the movies or shows of a section
    ///
    /// # Errors
    /// `NotFound` if the section id is unknown
    async fn list_items(&self, section_id: &SectionId) -> Result<ItemListing>;

    /// List the seasons of a show or the episodes of a season
    ///
    /// # Errors
    /// `NotFound` if the item id is unknown
    async fn list_children(&self, item_id: &ItemId) -> Result<ChildListing>;

    /// Ask the server to rescan a section, optionally limited to one path.
    ///
    /// Returns once the server accepted the request; the scan itself runs
    /// asynchronously upstream.
    async fn trigger_refresh(&self, section_id: &SectionId, path: Option<&str>) -> Result<()>;
}
