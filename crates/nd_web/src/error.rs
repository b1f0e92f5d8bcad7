use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Maps domain errors onto HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub nd_core::Error);

impl From<nd_core::Error> for ApiError {
    fn from(e: nd_core::Error) -> Self {
        Self(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        use nd_core::Error;
        match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::AccessDenied { .. } => StatusCode::FORBIDDEN,
            Error::InvalidFilter(_) | Error::UnknownTier(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
