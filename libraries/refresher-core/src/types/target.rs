/// Refresh targets and the user selections they are resolved from
use super::ids::SectionId;
use super::library::{Episode, Item};
use serde::{Deserialize, Serialize};

/// What the user picked to refresh, as the caller already holds it from a
/// previous listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Selection {
    /// A whole library section
    Library { section_id: SectionId },
    /// A movie or show from a section listing
    Item { item: Item },
    /// An episode; the section is the show's section
    Episode {
        section_id: SectionId,
        episode: Episode,
    },
}

/// A resolved refresh call: the section to rescan and, for a single file,
/// the path that scopes the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RefreshTarget {
    Library {
        section_id: SectionId,
    },
    Item {
        section_id: SectionId,
        path: Option<String>,
    },
    Episode {
        section_id: SectionId,
        path: String,
    },
}

impl RefreshTarget {
    /// Section the refresh is issued against
    pub fn section_id(&self) -> &SectionId {
        match self {
            RefreshTarget::Library { section_id }
            | RefreshTarget::Item { section_id, .. }
            | RefreshTarget::Episode { section_id, .. } => section_id,
        }
    }

    /// Path query parameter, `None` for an unscoped refresh
    pub fn path(&self) -> Option<&str> {
        match self {
            RefreshTarget::Library { .. } => None,
            RefreshTarget::Item { path, .. } => path.as_deref(),
            RefreshTarget::Episode { path, .. } => Some(path),
        }
    }

    /// Whether the refresh is limited to one file
    pub fn is_scoped(&self) -> bool {
        self.path().is_some()
    }
}
