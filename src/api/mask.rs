use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use super::SessionResponse;
use crate::error::ApiError;
use crate::models::SceneType;
use crate::server::AppState;

/// Request body for mask creation
#[derive(Debug, Deserialize, ToSchema)]
pub struct MaskRequest {
    /// Surface type to detect
    pub scene: SceneType,
}

/// Request a paintability mask for the current photo
///
/// Sends the original upload to the segmentation service. Mask requests are
/// handled one at a time; the session itself stays available meanwhile. A
/// mask that arrives after a new photo was uploaded is discarded with 409.
#[utoipa::path(
    post,
    path = "/api/mask",
    request_body = MaskRequest,
    responses(
        (status = 200, description = "Mask ready", body = SessionResponse),
        (status = 409, description = "No image loaded, or image replaced during the request"),
        (status = 415, description = "Body is not JSON"),
        (status = 422, description = "Missing or unknown scene"),
        (status = 502, description = "Segmentation service failed or returned an unusable mask"),
    ),
    tag = "Session"
)]
pub async fn handle_mask(
    State(state): State<AppState>,
    request: Result<Json<MaskRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let Json(request) = request?;
    let _in_flight = state.mask_requests.lock().await;

    let target = state.session.lock().await.mask_target()?;
    tracing::info!(
        scene = %request.scene,
        digest = %target.image().digest(),
        "Mask requested"
    );

    let mask = target
        .fetch(state.provider.as_ref(), request.scene)
        .await?;

    let mut session = state.session.lock().await;
    session.install_mask(&target, request.scene, mask)?;
    Ok(Json(SessionResponse::from(&*session)))
}
