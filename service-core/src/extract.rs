//! Request extractors whose rejections speak the `{ "message": ... }` envelope.

use crate::error::AppError;
use axum::extract::{
    FromRequest,
    multipart::{MultipartError, MultipartRejection},
    rejection::JsonRejection,
};
use axum::http::StatusCode;

/// JSON body extractor. Malformed or oversized bodies become [`AppError`]s
/// instead of axum's plain-text rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        body_error(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        body_error(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        body_error(err.status(), err.body_text())
    }
}

fn body_error(status: StatusCode, text: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Request body is too large".to_string())
    } else {
        AppError::ValidationError(format!("Invalid request body: {}", text))
    }
}
