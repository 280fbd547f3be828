//! Filter panel endpoints.

use axum::{extract::State, Json};

use super::{respond, ApiResult};
use crate::models::{FilterCriteria, FilterPatch};
use crate::portal::FilterOptions;
use crate::AppState;

/// GET /api/filters - Current criteria.
pub async fn get_filters(State(state): State<AppState>) -> ApiResult<FilterCriteria> {
    let portal = state.portal.read().await;
    let revision_id = portal.revision_id();

    let result = portal
        .session()
        .require_signed_in()
        .map(|()| portal.criteria().clone());
    respond(result, revision_id)
}

/// PUT /api/filters - Change one or more criteria. Empty strings reset a field.
pub async fn update_filters(
    State(state): State<AppState>,
    Json(patch): Json<FilterPatch>,
) -> ApiResult<FilterCriteria> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();
    respond(portal.update_filters(&patch), revision_id)
}

/// DELETE /api/filters - Clear every criterion and the search query.
pub async fn clear_filters(State(state): State<AppState>) -> ApiResult<FilterCriteria> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();

    let result = portal
        .clear_filters()
        .map(|()| portal.criteria().clone());
    respond(result, revision_id)
}

/// GET /api/filters/options - Subject, status and role selector values.
pub async fn filter_options(State(state): State<AppState>) -> ApiResult<FilterOptions> {
    let portal = state.portal.read().await;
    let revision_id = portal.revision_id();
    respond(portal.filter_options(), revision_id)
}
