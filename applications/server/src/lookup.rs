/// Lookups for callers that know ids but do not yet hold the listed objects
use crate::error::{Result, ServerError};
use refresher_core::{Child, Episode, Item, ItemId, LibraryBackend, SectionId};

/// Find an item of a section through the section listing.
pub async fn find_item(
    backend: &dyn LibraryBackend,
    section_id: &SectionId,
    item_id: &ItemId,
) -> Result<Item> {
    let listing = backend.list_items(section_id).await?;
    listing
        .items
        .into_iter()
        .find(|item| &item.id == item_id)
        .ok_or_else(|| {
            ServerError::NotFound(format!("Item {} not in section {}", item_id, section_id))
        })
}

/// Find an episode of a season through the season's children listing.
pub async fn find_episode(
    backend: &dyn LibraryBackend,
    season_id: &ItemId,
    episode_id: &ItemId,
) -> Result<Episode> {
    let listing = backend.list_children(season_id).await?;
    match listing.find(episode_id) {
        Some(Child::Episode(episode)) => Ok(episode.clone()),
        Some(Child::Season(_)) => Err(ServerError::BadRequest(format!(
            "{} is a season, not an episode",
            episode_id
        ))),
        None => Err(ServerError::NotFound(format!(
            "Episode {} not in season {}",
            episode_id, season_id
        ))),
    }
}
