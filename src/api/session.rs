//! Session and theme endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, Json};
use serde::Serialize;
use tokio::sync::RwLock;

use super::{respond, success, ApiResult};
use crate::portal::Portal;
use crate::session::{LoginForm, PendingLogout, SessionView, Theme};
use crate::AppState;

/// Result of a logout request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    /// Set while the grace period is running; absent if logout completed immediately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingLogout>,
    pub session: SessionView,
}

/// POST /api/session/login - Mock sign-in.
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> ApiResult<SessionView> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();

    let result = portal.login(&form).map(|()| portal.session().view());
    respond(result, revision_id)
}

/// POST /api/session/logout - Start the logout grace period.
pub async fn logout(State(state): State<AppState>) -> ApiResult<LogoutResponse> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();

    let pending = match portal.request_logout() {
        Ok(pending) => pending,
        Err(e) => return super::error(e, revision_id),
    };

    let grace = portal.session().logout_grace();
    let pending = if grace.is_zero() {
        portal.complete_logout(pending.token);
        None
    } else {
        schedule_logout(state.portal.clone(), pending.token, grace);
        Some(pending)
    };

    success(
        LogoutResponse {
            pending,
            session: portal.session().view(),
        },
        revision_id,
    )
}

/// POST /api/session/logout/cancel - Abort a pending logout.
pub async fn cancel_logout(State(state): State<AppState>) -> ApiResult<bool> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();
    respond(portal.cancel_logout(), revision_id)
}

/// POST /api/theme/toggle - Switch between dark and light.
pub async fn toggle_theme(State(state): State<AppState>) -> ApiResult<Theme> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();
    success(portal.toggle_theme(), revision_id)
}

/// Complete the logout tagged `token` once `grace` has elapsed.
fn schedule_logout(portal: Arc<RwLock<Portal>>, token: u64, grace: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        let completed = portal.write().await.complete_logout(token);
        if !completed {
            tracing::debug!(token, "Logout timer fired after cancel or supersede");
        }
    });
}
