//! Client configuration and the Plex API response shapes.

use refresher_core::{
    Child, Episode, Item, ItemId, ItemKind, Season, Section, SectionId, SectionKind,
};
use serde::Deserialize;
use std::time::Duration;

/// Configuration for connecting to a Plex Media Server.
#[derive(Debug, Clone)]
pub struct PlexConfig {
    /// Base URL of the server (e.g., "http://plex.local:32400")
    pub url: String,
    /// `X-Plex-Token` sent with every request
    pub token: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl PlexConfig {
    /// Create a config with the default 30 second timeout.
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// Response Envelopes
// =============================================================================

/// Every Plex JSON reply wraps its payload in a `MediaContainer`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(rename = "MediaContainer")]
    pub media_container: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SectionsContainer {
    #[serde(rename = "Directory", default)]
    pub directory: Vec<PlexDirectory>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlexDirectory {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub type_: String,
}

impl PlexDirectory {
    pub(crate) fn into_section(self) -> Section {
        Section {
            id: SectionId::new(self.key),
            title: self.title,
            kind: SectionKind::from_plex(&self.type_),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemsContainer {
    #[serde(default)]
    pub title1: String,
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<PlexMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChildrenContainer {
    #[serde(default)]
    pub parent_title: String,
    pub grandparent_title: Option<String>,
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<ChildEntry>,
}

// =============================================================================
// Metadata Entries
// =============================================================================

/// A movie or show entry of a section listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlexMetadata {
    pub rating_key: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub type_: String,
    #[serde(rename = "Media", default)]
    pub media: Vec<PlexMedia>,
    #[serde(rename = "Location", default)]
    pub location: Vec<PlexLocation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlexMedia {
    #[serde(rename = "Part", default)]
    pub part: Vec<PlexPart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlexPart {
    #[serde(default)]
    pub file: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlexLocation {
    #[serde(default)]
    pub path: String,
}

/// File of the first part of the first media, the one a refresh scopes to.
fn first_file(media: &[PlexMedia]) -> Option<String> {
    media
        .first()
        .and_then(|m| m.part.first())
        .map(|p| p.file.clone())
        .filter(|f| !f.is_empty())
}

impl PlexMetadata {
    pub(crate) fn into_item(self, section_id: &SectionId) -> Item {
        let kind = ItemKind::from_plex(&self.type_);
        let path = first_file(&self.media);
        let location = if path.is_none() {
            self.location
                .first()
                .map(|l| l.path.clone())
                .filter(|p| !p.is_empty())
        } else {
            None
        };

        Item {
            id: ItemId::new(self.rating_key),
            title: self.title,
            kind,
            section_id: section_id.clone(),
            path,
            location,
        }
    }
}

/// A children entry as listed. Entries without a `type` the listing can
/// dispatch on are kept as `Untyped` and skipped like other non-children.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ChildEntry {
    Typed(PlexChild),
    Untyped(serde::de::IgnoredAny),
}

impl ChildEntry {
    pub(crate) fn into_child(self, parent_id: &ItemId) -> Option<Child> {
        match self {
            ChildEntry::Typed(child) => child.into_child(parent_id),
            ChildEntry::Untyped(_) => None,
        }
    }
}

/// A children entry, discriminated by the `type` attribute.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum PlexChild {
    Season(PlexSeason),
    Episode(PlexEpisode),
    /// Clips, extras and anything else that is neither
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlexSeason {
    pub rating_key: String,
    pub parent_rating_key: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub index: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlexEpisode {
    pub rating_key: String,
    pub parent_rating_key: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub index: u32,
    #[serde(rename = "Media", default)]
    pub media: Vec<PlexMedia>,
}

impl PlexChild {
    /// Convert to the domain type; `parent_id` fills in a missing parent key.
    pub(crate) fn into_child(self, parent_id: &ItemId) -> Option<Child> {
        match self {
            PlexChild::Season(season) => Some(Child::Season(Season {
                id: ItemId::new(season.rating_key),
                show_id: season
                    .parent_rating_key
                    .map(ItemId::new)
                    .unwrap_or_else(|| parent_id.clone()),
                title: season.title,
                index: season.index,
            })),
            PlexChild::Episode(episode) => Some(Child::Episode(Episode {
                path: first_file(&episode.media).unwrap_or_default(),
                id: ItemId::new(episode.rating_key),
                season_id: episode
                    .parent_rating_key
                    .map(ItemId::new)
                    .unwrap_or_else(|| parent_id.clone()),
                title: episode.title,
                index: episode.index,
            })),
            PlexChild::Other => None,
        }
    }
}
