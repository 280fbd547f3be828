//! Portal snapshot endpoint.

use axum::extract::State;

use super::{success, ApiResult};
use crate::portal::PortalSnapshot;
use crate::AppState;

/// GET /api/portal - Everything needed to render the current screen.
pub async fn get_portal(State(state): State<AppState>) -> ApiResult<PortalSnapshot> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();
    success(portal.snapshot(), revision_id)
}
