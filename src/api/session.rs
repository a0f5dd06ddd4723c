use axum::{extract::State, response::Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::SceneType;
use crate::server::AppState;
use crate::services::{Session, SessionState};

/// Current session summary returned by every session-changing endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Lifecycle state: empty, image_loaded or masked
    pub state: SessionState,
    /// Canvas width in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Canvas height in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Short SHA-256 digest of the uploaded file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    /// Scene type the current mask was requested with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<SceneType>,
    /// Fraction of canvas pixels the mask paints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<f64>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        let image = session.image();
        Self {
            state: session.state(),
            width: image.map(|i| i.dimensions().0),
            height: image.map(|i| i.dimensions().1),
            digest: image.map(|i| i.digest().to_string()),
            scene: session.scene(),
            coverage: session.mask().map(|m| m.coverage()),
        }
    }
}

/// Get the current session state
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Current session", body = SessionResponse),
    ),
    tag = "Session"
)]
pub async fn handle_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.session.lock().await;
    Json(SessionResponse::from(&*session))
}
