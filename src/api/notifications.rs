//! Notification endpoints.

use axum::extract::{Path, State};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::notify::Notification;
use crate::AppState;

/// GET /api/notifications - Notifications that have not expired or been dismissed.
pub async fn list_notifications(State(state): State<AppState>) -> ApiResult<Vec<Notification>> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();
    success(portal.notifications(), revision_id)
}

/// DELETE /api/notifications/{id} - Dismiss one notification.
pub async fn dismiss_notification(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<()> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();

    if portal.dismiss_notification(id) {
        success((), revision_id)
    } else {
        error(
            AppError::NotFound(format!("Notification {} not found", id)),
            revision_id,
        )
    }
}
