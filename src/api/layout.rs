//! Responsive layout endpoints. These work whether or not anyone is signed in.

use axum::{extract::State, Json};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::layout::Layout;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ViewportBody {
    pub width: u32,
}

/// PUT /api/layout/viewport - Viewport resized.
pub async fn resize(
    State(state): State<AppState>,
    Json(body): Json<ViewportBody>,
) -> ApiResult<Layout> {
    update(&state, |layout| layout.resize(body.width)).await
}

/// POST /api/layout/sidebar/toggle
pub async fn toggle_sidebar(State(state): State<AppState>) -> ApiResult<Layout> {
    update(&state, Layout::toggle_sidebar).await
}

/// POST /api/layout/sidebar/close
pub async fn close_sidebar(State(state): State<AppState>) -> ApiResult<Layout> {
    update(&state, Layout::close_sidebar).await
}

/// POST /api/layout/filters/toggle
pub async fn toggle_filter_panel(State(state): State<AppState>) -> ApiResult<Layout> {
    update(&state, Layout::toggle_filter_panel).await
}

/// POST /api/layout/profile-menu/toggle
pub async fn toggle_profile_menu(State(state): State<AppState>) -> ApiResult<Layout> {
    update(&state, Layout::toggle_profile_dropdown).await
}

/// POST /api/layout/outside-click - Pointer down outside the profile menu.
pub async fn outside_click(State(state): State<AppState>) -> ApiResult<Layout> {
    update(&state, Layout::outside_click).await
}

async fn update(state: &AppState, apply: impl FnOnce(&mut Layout)) -> ApiResult<Layout> {
    let mut portal = state.portal.write().await;
    apply(portal.layout_mut());
    success(portal.layout().clone(), portal.revision_id())
}
