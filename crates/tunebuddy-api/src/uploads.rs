use axum::{
    Extension, Json,
    extract::{Multipart, State},
};
use tracing::info;
use uuid::Uuid;

use tunebuddy_types::api::{Claims, UploadResponse};

use crate::auth::AppState;
use crate::error::{ApiError, ApiResult};

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Accepts a single `image` part, stores it under the upload directory
/// with a generated name, and returns the path the static server exposes.
pub async fn upload_image(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::Validation(format!("Malformed multipart body: {}", e))
    })? {
        if field.name() != Some("image") {
            continue;
        }

        let ext = field
            .file_name()
            .and_then(|name| name.rsplit('.').next())
            .map(str::to_lowercase)
            .ok_or_else(|| ApiError::Validation("Missing file name".to_string()))?;
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ApiError::Validation(format!(
                "Unsupported image type '{}'",
                ext
            )));
        }

        let bytes = field.bytes().await.map_err(|e| {
            ApiError::Validation(format!("Failed to read upload: {}", e))
        })?;
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(ApiError::Validation("Image exceeds 5 MB".to_string()));
        }
        if bytes.is_empty() {
            return Err(ApiError::Validation("Empty image".to_string()));
        }

        let filename = format!("profile-{}.{}", Uuid::new_v4(), ext);
        let path = state.upload_dir.join(&filename);
        tokio::fs::create_dir_all(&state.upload_dir)
            .await
            .map_err(|e| anyhow::Error::from(e))?;
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| anyhow::Error::from(e))?;

        info!(
            "User {} uploaded {} ({} bytes)",
            claims.sub,
            filename,
            bytes.len()
        );
        return Ok(Json(UploadResponse {
            image_url: format!("/uploads/{}", filename),
        }));
    }

    Err(ApiError::Validation("No image field provided".to_string()))
}
