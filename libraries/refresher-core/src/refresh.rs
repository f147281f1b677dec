//! Resolution of user selections into refresh calls.
//!
//! The rules per hierarchy level:
//!
//! - **Library**: the section id, never a path.
//! - **Item**: the item's own section; movies are scoped to their file when
//!   they have one, shows are refreshed by section alone and left to the
//!   server's own matching.
//! - **Episode**: the show's section, always scoped to the episode file.
//!
//! Resolution works only on the objects the caller already holds and never
//! issues a request of its own.

use crate::error::{RefresherError, Result};
use crate::traits::LibraryBackend;
use crate::types::{RefreshTarget, Selection};
use std::sync::Arc;
use tracing::info;

/// Resolve a selection into the section and optional path to refresh.
///
/// # Errors
/// `InvalidTarget` if the section id is blank or an episode has no file path.
pub fn resolve(selection: Selection) -> Result<RefreshTarget> {
    match selection {
        Selection::Library { section_id } => {
            if section_id.is_empty() {
                return Err(RefresherError::InvalidTarget(
                    "section id is required".to_string(),
                ));
            }
            Ok(RefreshTarget::Library { section_id })
        }
        Selection::Item { item } => {
            if item.section_id.is_empty() {
                return Err(RefresherError::InvalidTarget(format!(
                    "item {} has no section id",
                    item.id
                )));
            }
            let path = if item.is_container() {
                None
            } else {
                item.file_path().map(str::to_string)
            };
            Ok(RefreshTarget::Item {
                section_id: item.section_id,
                path,
            })
        }
        Selection::Episode {
            section_id,
            episode,
        } => {
            if section_id.is_empty() {
                return Err(RefresherError::InvalidTarget(format!(
                    "episode {} has no section id",
                    episode.id
                )));
            }
            if episode.path.trim().is_empty() {
                return Err(RefresherError::InvalidTarget(format!(
                    "episode {} has no file path",
                    episode.id
                )));
            }
            Ok(RefreshTarget::Episode {
                section_id,
                path: episode.path,
            })
        }
    }
}

/// Dispatches refreshes for user selections to a library backend.
pub struct Refresher<B: ?Sized> {
    backend: Arc<B>,
}

impl<B: ?Sized> Clone for Refresher<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: LibraryBackend + ?Sized> Refresher<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Resolve the selection and issue a single refresh call.
    ///
    /// Returns the target that was sent upstream.
    pub async fn refresh(&self, selection: Selection) -> Result<RefreshTarget> {
        let target = resolve(selection)?;
        self.dispatch(target).await
    }

    /// Issue a refresh for an already resolved target.
    pub async fn dispatch(&self, target: RefreshTarget) -> Result<RefreshTarget> {
        if target.section_id().is_empty() {
            return Err(RefresherError::InvalidTarget(
                "section id is required".to_string(),
            ));
        }
        if let RefreshTarget::Episode { path, .. } = &target {
            if path.trim().is_empty() {
                return Err(RefresherError::InvalidTarget(
                    "episode refresh needs a file path".to_string(),
                ));
            }
        }

        info!(
            section_id = %target.section_id(),
            path = target.path().unwrap_or(""),
            "Triggering refresh"
        );

        self.backend
            .trigger_refresh(target.section_id(), target.path())
            .await?;

        Ok(target)
    }
}

impl<B: ?Sized> std::fmt::Debug for Refresher<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refresher").finish_non_exhaustive()
    }
}
