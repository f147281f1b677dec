/// Library hierarchy types: sections, items, seasons and episodes
use super::ids::{ItemId, SectionId};
use serde::{Deserialize, Serialize};

/// Kind of content a library section holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Movie library
    Movie,
    /// TV show library
    Show,
    /// Music library (`artist` upstream)
    Music,
    /// Photo library
    Photo,
    /// Anything else the server reports
    #[serde(other)]
    Other,
}

impl SectionKind {
    /// Map the upstream `type` attribute
    pub fn from_plex(value: &str) -> Self {
        match value {
            "movie" => Self::Movie,
            "show" => Self::Show,
            "artist" => Self::Music,
            "photo" => Self::Photo,
            _ => Self::Other,
        }
    }
}

/// A top-level library grouping, e.g. "Movies" or "TV Shows"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
}

/// Kind of a section entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Movie,
    Show,
    #[serde(other)]
    Other,
}

impl ItemKind {
    /// Map the upstream `type` attribute
    pub fn from_plex(value: &str) -> Self {
        match value {
            "movie" => Self::Movie,
            "show" => Self::Show,
            _ => Self::Other,
        }
    }
}

/// A movie or show within a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Parent section
    pub section_id: SectionId,
    /// File of the first media part. Movies only; a show has no single file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Root folder of a show. Shown to the user, never used to scope a refresh.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Item {
    /// Whether this item is a container of seasons rather than a playable file
    pub fn is_container(&self) -> bool {
        self.kind == ItemKind::Show
    }

    /// The file path, if the item has a non-empty one
    pub fn file_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.trim().is_empty())
    }
}

/// A season of a show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: ItemId,
    pub show_id: ItemId,
    pub title: String,
    /// Position within the show (0 for specials)
    #[serde(default)]
    pub index: u32,
}

/// An episode of a season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: ItemId,
    pub season_id: ItemId,
    pub title: String,
    #[serde(default)]
    pub index: u32,
    /// File of the first media part, empty when the server reported none
    #[serde(default)]
    pub path: String,
}

/// One entry of a children listing. Seasons and episodes share an upstream
/// endpoint but never a shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Child {
    Season(Season),
    Episode(Episode),
}

impl Child {
    /// Id of the entry regardless of variant
    pub fn id(&self) -> &ItemId {
        match self {
            Child::Season(season) => &season.id,
            Child::Episode(episode) => &episode.id,
        }
    }
}

/// Items of one section along with the section title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemListing {
    pub section_id: SectionId,
    pub title: String,
    pub items: Vec<Item>,
}

/// Children of one item along with the parent titles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildListing {
    pub parent_id: ItemId,
    /// Title of the listed item (show title for seasons, season title for episodes)
    pub title: String,
    /// Show title when listing a season's episodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grandparent_title: Option<String>,
    pub children: Vec<Child>,
}

impl ChildListing {
    /// Seasons in listing order, skipping any episodes
    pub fn seasons(&self) -> impl Iterator<Item = &Season> {
        self.children.iter().filter_map(|child| match child {
            Child::Season(season) => Some(season),
            Child::Episode(_) => None,
        })
    }

    /// Episodes in listing order, skipping any seasons
    pub fn episodes(&self) -> impl Iterator<Item = &Episode> {
        self.children.iter().filter_map(|child| match child {
            Child::Episode(episode) => Some(episode),
            Child::Season(_) => None,
        })
    }

    /// Find a child by id
    pub fn find(&self, id: &ItemId) -> Option<&Child> {
        self.children.iter().find(|child| child.id() == id)
    }
}
