/// Refresh API route
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use refresher_core::{RefreshTarget, SectionId, Selection};
use serde::{Deserialize, Serialize};

/// Body of POST /api/refresh.
///
/// Either a selection the browser got from a listing, or the bare
/// `{section_id, path}` form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RefreshRequest {
    Selection(Selection),
    Direct(DirectRefresh),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectRefresh {
    #[serde(default)]
    pub section_id: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl DirectRefresh {
    fn into_target(self) -> Result<RefreshTarget> {
        let section_id = self
            .section_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ServerError::BadRequest("section_id is required".to_string()))?;
        let section_id = SectionId::new(section_id);

        Ok(match self.path.filter(|p| !p.trim().is_empty()) {
            Some(path) => RefreshTarget::Item {
                section_id,
                path: Some(path),
            },
            None => RefreshTarget::Library { section_id },
        })
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
    pub section_id: SectionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// POST /api/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<RefreshResponse>> {
    let Json(req) = payload?;
    let target = match req {
        RefreshRequest::Selection(selection) => app_state.refresher.refresh(selection).await?,
        RefreshRequest::Direct(direct) => {
            let target = direct.into_target()?;
            app_state.refresher.dispatch(target).await?
        }
    };

    Ok(Json(RefreshResponse {
        success: true,
        message: "Refresh triggered successfully".to_string(),
        path: target.path().map(str::to_string),
        section_id: target.section_id().clone(),
    }))
}
