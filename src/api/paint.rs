use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::server::AppState;
use crate::services::imaging;

/// Query parameters for the paint endpoint
#[derive(Debug, Deserialize)]
pub struct PaintQuery {
    /// Hex paint color, `#` optional
    pub color: String,
}

/// Render the current photo repainted with a color
///
/// Always paints from the original upload, never from a previous result.
#[utoipa::path(
    get,
    path = "/api/paint",
    responses(
        (status = 200, description = "Painted PNG image", content_type = "image/png"),
        (status = 400, description = "Missing or invalid color"),
        (status = 409, description = "No image or no mask yet"),
    ),
    params(
        ("color" = String, Query, description = "Paint color as hex, e.g. 'FF0000' or '%23FF0000'"),
    ),
    tag = "Paint"
)]
pub async fn handle_paint(
    State(state): State<AppState>,
    query: Result<Query<PaintQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let job = state.session.lock().await.paint_job(&query.color)?;
    let color = job.color();

    let png_bytes = tokio::task::spawn_blocking(move || imaging::encode_png(&job.run()))
        .await
        .map_err(|e| ApiError::Internal(format!("paint task failed: {e}")))?
        .map_err(|e| ApiError::Encode(e.to_string()))?;

    tracing::info!(%color, bytes = png_bytes.len(), "Painted image rendered");

    let content_length = png_bytes.len().to_string();
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CONTENT_LENGTH, content_length.as_str()),
        ],
        Bytes::from(png_bytes),
    )
        .into_response())
}
