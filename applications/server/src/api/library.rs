/// Library browse API routes
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use refresher_core::{
    ChildListing, Episode, ItemId, ItemListing, Season, Section, SectionId,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SeasonsResponse {
    pub show_id: ItemId,
    pub title: String,
    pub seasons: Vec<Season>,
}

#[derive(Debug, Serialize)]
pub struct EpisodesResponse {
    pub season_id: ItemId,
    pub show_title: String,
    pub season_title: String,
    pub episodes: Vec<Episode>,
}

/// GET /api/sections
pub async fn list_sections(State(app_state): State<AppState>) -> Result<Json<Vec<Section>>> {
    let sections = app_state.backend.list_sections().await?;
    Ok(Json(sections))
}

/// GET /api/sections/:id
pub async fn list_items(
    Path(section_id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<ItemListing>> {
    let listing = app_state
        .backend
        .list_items(&SectionId::new(section_id))
        .await?;
    Ok(Json(listing))
}

/// GET /api/items/:id/children
/// Seasons or episodes, each tagged with its `type`
pub async fn list_children(
    Path(item_id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<ChildListing>> {
    let listing = app_state.backend.list_children(&ItemId::new(item_id)).await?;
    Ok(Json(listing))
}

/// GET /api/shows/:id/seasons
pub async fn list_seasons(
    Path(show_id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<SeasonsResponse>> {
    let listing = app_state.backend.list_children(&ItemId::new(show_id)).await?;

    Ok(Json(SeasonsResponse {
        seasons: listing.seasons().cloned().collect(),
        show_id: listing.parent_id,
        title: listing.title,
    }))
}

/// GET /api/seasons/:id/episodes
pub async fn list_episodes(
    Path(season_id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<EpisodesResponse>> {
    let listing = app_state
        .backend
        .list_children(&ItemId::new(season_id))
        .await?;

    Ok(Json(EpisodesResponse {
        episodes: listing.episodes().cloned().collect(),
        season_id: listing.parent_id,
        show_title: listing.grandparent_title.unwrap_or_default(),
        season_title: listing.title,
    }))
}
