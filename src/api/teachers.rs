//! Teacher list endpoints.

use axum::extract::{Path, Query, State};

use super::{error, respond, success, ApiResult};
use crate::models::{FilterPatch, Teacher};
use crate::AppState;

/// GET /api/teachers - Filtered view.
///
/// Uses the stored criteria; any `search`, `subject`, `status` or `role`
/// query parameter overrides the stored value for this request only.
pub async fn list_teachers(
    State(state): State<AppState>,
    Query(overrides): Query<FilterPatch>,
) -> ApiResult<Vec<Teacher>> {
    let portal = state.portal.read().await;
    let revision_id = portal.revision_id();

    if overrides.is_empty() {
        return respond(portal.filtered_teachers(), revision_id);
    }

    match portal.criteria().merged(&overrides) {
        Ok(criteria) => respond(portal.teachers_matching(&criteria), revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/teachers/{id} - Get a single teacher.
pub async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Teacher> {
    let portal = state.portal.read().await;
    let revision_id = portal.revision_id();
    respond(portal.teacher(&id), revision_id)
}

/// DELETE /api/teachers/{id} - Delete a teacher.
///
/// Deleting an unknown id succeeds with `null` data and leaves the list as is.
pub async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Option<Teacher>> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();

    match portal.delete_teacher(&id) {
        Ok(removed) => success(removed, portal.revision_id()),
        Err(e) => error(e, revision_id),
    }
}
