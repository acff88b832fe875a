use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use smilehard_core::imaging::infrastructure::data_url_decoder::ImageDecodeError;

/// Request failures surfaced to the client as `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No image data")]
    MissingImage,
    #[error("Invalid image data")]
    InvalidImage(#[source] ImageDecodeError),
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingImage | ApiError::InvalidImage(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::InvalidImage(e) => log::debug!("Rejecting image payload: {e}"),
            ApiError::Internal(detail) => log::error!("Request failed: {detail}"),
            ApiError::MissingImage => {}
        }
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
