//! `LibraryBackend` implementation backed by the Plex HTTP API.

use crate::client::PlexClient;
use async_trait::async_trait;
use refresher_core::{ChildListing, ItemId, ItemListing, LibraryBackend, Section, SectionId};

#[async_trait]
impl LibraryBackend for PlexClient {
    async fn list_sections(&self) -> refresher_core::Result<Vec<Section>> {
        Ok(self.library().list_sections().await?)
    }

    async fn list_items(&self, section_id: &SectionId) -> refresher_core::Result<ItemListing> {
        Ok(self.library().list_items(section_id).await?)
    }

    async fn list_children(&self, item_id: &ItemId) -> refresher_core::Result<ChildListing> {
        Ok(self.library().list_children(item_id).await?)
    }

    async fn trigger_refresh(
        &self,
        section_id: &SectionId,
        path: Option<&str>,
    ) -> refresher_core::Result<()> {
        Ok(self.library().trigger_refresh(section_id, path).await?)
    }
}
