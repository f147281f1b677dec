//! Library browse and refresh operations against a Plex Media Server.

use crate::error::{PlexClientError, Result};
use crate::types::{ChildrenContainer, Envelope, ItemsContainer, SectionsContainer};
use refresher_core::{ChildListing, ItemId, ItemListing, Section, SectionId};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use url::Url;

const TOKEN_HEADER: &str = "X-Plex-Token";

/// Library client for a Plex Media Server.
pub struct LibraryClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: &'a str,
}

impl<'a> LibraryClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, token: &'a str) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// List all library sections.
    ///
    /// Sections with a blank or repeated key are dropped so every returned id
    /// is unique and non-empty.
    pub async fn list_sections(&self) -> Result<Vec<Section>> {
        let url = self.endpoint(&["library", "sections"])?;
        debug!(url = %url, "Fetching library sections");

        let response = self.get(url, None).await?;
        let envelope: Envelope<SectionsContainer> =
            Self::parse(ensure_success(response, "Library sections").await?, "sections").await?;

        let mut seen = HashSet::new();
        let mut sections = Vec::new();
        for directory in envelope.media_container.directory {
            if directory.key.trim().is_empty() {
                warn!(title = %directory.title, "Skipping section without a key");
                continue;
            }
            if !seen.insert(directory.key.clone()) {
                warn!(key = %directory.key, "Skipping duplicate section");
                continue;
            }
            sections.push(directory.into_section());
        }

        debug!(sections = sections.len(), "Fetched library sections");
        Ok(sections)
    }

    /// List the items of a section.
    pub async fn list_items(&self, section_id: &SectionId) -> Result<ItemListing> {
        let url = self.endpoint(&["library", "sections", section_id.as_str(), "all"])?;
        debug!(url = %url, section_id = %section_id, "Fetching section items");

        let response = self.get(url, None).await?;
        let what = format!("Section {}", section_id);
        let envelope: Envelope<ItemsContainer> =
            Self::parse(ensure_success(response, &what).await?, "items").await?;

        let container = envelope.media_container;
        let items: Vec<_> = container
            .metadata
            .into_iter()
            .map(|entry| entry.into_item(section_id))
            .collect();

        debug!(section_id = %section_id, items = items.len(), "Fetched section items");

        Ok(ItemListing {
            section_id: section_id.clone(),
            title: container.title1,
            items,
        })
    }

    /// List the seasons of a show or the episodes of a season.
    pub async fn list_children(&self, item_id: &ItemId) -> Result<ChildListing> {
        let url = self.endpoint(&["library", "metadata", item_id.as_str(), "children"])?;
        debug!(url = %url, item_id = %item_id, "Fetching children");

        let response = self.get(url, None).await?;
        let what = format!("Item {}", item_id);
        let envelope: Envelope<ChildrenContainer> =
            Self::parse(ensure_success(response, &what).await?, "children").await?;

        let container = envelope.media_container;
        let total = container.metadata.len();
        let children: Vec<_> = container
            .metadata
            .into_iter()
            .filter_map(|entry| entry.into_child(item_id))
            .collect();

        if children.len() < total {
            debug!(
                item_id = %item_id,
                skipped = total - children.len(),
                "Skipped children that are neither seasons nor episodes"
            );
        }

        Ok(ChildListing {
            parent_id: item_id.clone(),
            title: container.parent_title,
            grandparent_title: container.grandparent_title.filter(|t| !t.is_empty()),
            children,
        })
    }

    /// Ask the server to rescan a section.
    ///
    /// The `path` query parameter is sent only for a non-empty path. Success
    /// means the server accepted the request, not that the scan finished.
    pub async fn trigger_refresh(&self, section_id: &SectionId, path: Option<&str>) -> Result<()> {
        let url = self.endpoint(&["library", "sections", section_id.as_str(), "refresh"])?;
        let path = path.filter(|p| !p.is_empty());
        debug!(url = %url, section_id = %section_id, path = ?path, "Triggering refresh");

        let response = self.get(url, path).await?;
        let what = format!("Section {}", section_id);
        ensure_success(response, &what).await?;

        info!(section_id = %section_id, path = ?path, "Refresh accepted");
        Ok(())
    }

    /// Join path segments onto the base URL, escaping each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url =
            Url::parse(self.base_url).map_err(|e| PlexClientError::InvalidConfig(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| PlexClientError::InvalidConfig("URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url, path: Option<&str>) -> Result<Response> {
        let mut request = self
            .http
            .get(url)
            .header(TOKEN_HEADER, self.token)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(path) = path {
            request = request.query(&[("path", path)]);
        }

        request.send().await.map_err(PlexClientError::from_transport)
    }

    async fn parse<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        let bytes = response.bytes().await.map_err(PlexClientError::from_transport)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            PlexClientError::ParseError(format!("Failed to parse {} response: {}", what, e))
        })
    }
}

/// Map a non-success status onto the matching error.
async fn ensure_success(response: Response, what: &str) -> Result<Response> {
    let status = response.status();

    if status.is_success() {
        Ok(response)
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Err(PlexClientError::AuthFailed(format!(
            "Token rejected by server ({})",
            status.as_u16()
        )))
    } else if status == StatusCode::NOT_FOUND {
        Err(PlexClientError::NotFound(format!("{} not found", what)))
    } else {
        let error_text = response.text().await.unwrap_or_default();
        Err(PlexClientError::ServerError {
            status: status.as_u16(),
            message: error_text,
        })
    }
}
