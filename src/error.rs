use axum::{
    extract::rejection::{BytesRejection, JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use paint_recolor::ParseColorError;
use serde_json::json;
use thiserror::Error;

/// Failure while obtaining a mask from the segmentation service.
#[derive(Debug, Error)]
pub enum MaskError {
    #[error("Segmentation service error: {0}")]
    Service(String),

    #[error("Invalid segmentation response: {0}")]
    InvalidResponse(String),

    #[error("Mask decode error: {0}")]
    Decode(String),

    #[error("Segmentation request failed: {0}")]
    Transport(String),
}

/// Failure of a session operation.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),

    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Invalid color: {0}")]
    InvalidColor(#[from] ParseColorError),

    #[error(transparent)]
    Mask(#[from] MaskError),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// Request axum could not extract, with the rejection's own status
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Session(e) => match e {
                SessionError::InvalidState(_) => StatusCode::CONFLICT,
                SessionError::Decode(_) | SessionError::InvalidColor(_) => StatusCode::BAD_REQUEST,
                SessionError::Mask(_) => StatusCode::BAD_GATEWAY,
            },
            ApiError::Encode(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
