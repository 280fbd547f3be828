//! Dialog endpoints.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{error, respond, success, ApiResult};
use crate::dialog::{image_mime, to_data_url, Dialog};
use crate::models::{Teacher, TeacherPatch};
use crate::portal::SentMessage;
use crate::AppState;

/// Body of PUT /api/dialog/message.
#[derive(Debug, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: String,
}

/// Outcome of an avatar upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarUpload {
    /// False when a newer upload or a dialog change superseded this one.
    pub applied: bool,
    pub generation: u64,
    pub dialog: Dialog,
}

/// GET /api/dialog - The open dialog.
pub async fn get_dialog(State(state): State<AppState>) -> ApiResult<Dialog> {
    let portal = state.portal.read().await;
    success(portal.dialog().clone(), portal.revision_id())
}

/// POST /api/dialog/view/{id}
pub async fn open_view(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Dialog> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();
    respond(portal.open_view(&id).cloned(), revision_id)
}

/// POST /api/dialog/edit/{id}
pub async fn open_edit(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Dialog> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();
    respond(portal.open_edit(&id).cloned(), revision_id)
}

/// POST /api/dialog/add
pub async fn open_add(State(state): State<AppState>) -> ApiResult<Dialog> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();
    respond(portal.open_add().cloned(), revision_id)
}

/// POST /api/dialog/profile
pub async fn open_profile(State(state): State<AppState>) -> ApiResult<Dialog> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();
    respond(portal.open_profile().cloned(), revision_id)
}

/// POST /api/dialog/send/{id}
pub async fn open_send(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Dialog> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();
    respond(portal.open_send(&id).cloned(), revision_id)
}

/// PATCH /api/dialog/draft - Edit fields of the edit copy or add draft.
pub async fn patch_draft(
    State(state): State<AppState>,
    Json(patch): Json<TeacherPatch>,
) -> ApiResult<Dialog> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();
    respond(portal.patch_draft(patch).cloned(), revision_id)
}

/// PUT /api/dialog/message - Set the send-message text.
pub async fn set_message(
    State(state): State<AppState>,
    Json(body): Json<MessageBody>,
) -> ApiResult<Dialog> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();
    respond(portal.set_message(body.message).cloned(), revision_id)
}

/// POST /api/dialog/avatar - Attach an image (raw body, `Content-Type: image/*`).
///
/// Encoding runs off the lock. Only the most recent upload for the dialog
/// that is still open gets applied.
pub async fn attach_avatar(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<AvatarUpload> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let (ticket, mime, revision_id) = {
        let mut portal = state.portal.write().await;
        let revision_id = portal.revision_id();
        let started = image_mime(content_type)
            .and_then(|mime| portal.begin_avatar_read().map(|ticket| (ticket, mime)));
        match started {
            Ok((ticket, mime)) => (ticket, mime, revision_id),
            Err(e) => return error(e, revision_id),
        }
    };

    tracing::debug!(
        generation = ticket.generation(),
        bytes = body.len(),
        %mime,
        "Encoding avatar"
    );
    let data_url = match tokio::task::spawn_blocking(move || to_data_url(&mime, &body)).await {
        Ok(url) => url,
        Err(e) => return error(e.into(), revision_id),
    };

    let mut portal = state.portal.write().await;
    let applied = portal.complete_avatar_read(ticket, data_url);
    success(
        AvatarUpload {
            applied,
            generation: ticket.generation(),
            dialog: portal.dialog().clone(),
        },
        portal.revision_id(),
    )
}

/// DELETE /api/dialog/avatar - Clear the draft's avatar.
pub async fn clear_avatar(State(state): State<AppState>) -> ApiResult<Dialog> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();
    respond(portal.clear_avatar().cloned(), revision_id)
}

/// POST /api/dialog/save - Commit the edit dialog.
///
/// Data is `null` when the record was deleted while the dialog was open.
pub async fn save_edit(State(state): State<AppState>) -> ApiResult<Option<Teacher>> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();

    match portal.save_edit() {
        Ok(saved) => success(saved, portal.revision_id()),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/dialog/submit - Create a teacher from the add dialog.
pub async fn submit_new(State(state): State<AppState>) -> ApiResult<Teacher> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();

    match portal.submit_new() {
        Ok(teacher) => success(teacher, portal.revision_id()),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/dialog/send - "Send" the composed message.
pub async fn send_message(State(state): State<AppState>) -> ApiResult<SentMessage> {
    let mut portal = state.portal.write().await;
    let revision_id = portal.revision_id();
    respond(portal.send_message(), revision_id)
}

/// POST /api/dialog/close - Close or cancel whatever is open.
pub async fn close_dialog(State(state): State<AppState>) -> ApiResult<Dialog> {
    let mut portal = state.portal.write().await;
    portal.close_dialog();
    success(portal.dialog().clone(), portal.revision_id())
}
