//! Avatar attachments for the edit and add dialogs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::errors::AppError;

/// Tag for one in-flight avatar read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvatarTicket(pub(super) u64);

impl AvatarTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Normalize a `Content-Type` value and require an `image/*` type.
pub fn image_mime(content_type: &str) -> Result<String, AppError> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match mime.strip_prefix("image/") {
        Some(subtype) if !subtype.is_empty() => Ok(mime),
        _ => Err(AppError::UnsupportedMedia(format!(
            "Only image files can be attached, got '{}'",
            content_type
        ))),
    }
}

/// Embed image bytes as a `data:` URL for immediate preview.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
