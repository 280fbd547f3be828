//! REST API module.
//!
//! Every user event the portal understands is exposed as one endpoint.

mod dialog;
mod filters;
mod layout;
mod notifications;
mod portal;
mod session;
mod teachers;

pub use dialog::*;
pub use filters::*;
pub use layout::*;
pub use notifications::*;
pub use portal::*;
pub use session::*;
pub use teachers::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub revision_id: u64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, revision_id: u64) -> Self {
        Self {
            success: true,
            data,
            revision_id,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppErrorWithRevision>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T, revision_id: u64) -> ApiResult<T> {
    Ok(ApiResponse::new(data, revision_id))
}

/// Create an error API response.
pub fn error<T: Serialize>(err: crate::errors::AppError, revision_id: u64) -> ApiResult<T> {
    Err(crate::errors::AppErrorWithRevision {
        error: err,
        revision_id,
    })
}

/// Wrap a portal result in the response envelope.
pub fn respond<T: Serialize>(
    result: Result<T, crate::errors::AppError>,
    revision_id: u64,
) -> ApiResult<T> {
    match result {
        Ok(data) => success(data, revision_id),
        Err(e) => error(e, revision_id),
    }
}
