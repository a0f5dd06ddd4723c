use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::Json,
};

use super::SessionResponse;
use crate::error::ApiError;
use crate::server::AppState;
use crate::services::LoadedImage;

/// Upload a photo
///
/// Replaces the session photo and discards any existing mask. The body is
/// the raw image file (PNG, JPEG, WebP or BMP).
#[utoipa::path(
    post,
    path = "/api/image",
    request_body(content = String, description = "Raw image file bytes", content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Image loaded", body = SessionResponse),
        (status = 400, description = "Empty body or undecodable image"),
        (status = 413, description = "Upload too large"),
    ),
    tag = "Session"
)]
pub async fn handle_upload(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let body = body?;
    if body.is_empty() {
        return Err(ApiError::BadRequest("empty image body".to_string()));
    }

    tracing::info!(bytes = body.len(), "Image upload received");

    let canvas = state.config.canvas;
    let loaded = tokio::task::spawn_blocking(move || LoadedImage::decode(body.to_vec(), &canvas))
        .await
        .map_err(|e| ApiError::Internal(format!("decode task failed: {e}")))??;

    let mut session = state.session.lock().await;
    session.replace_image(loaded);
    Ok(Json(SessionResponse::from(&*session)))
}
