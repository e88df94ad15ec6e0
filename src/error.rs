use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Failed to initialize OCR engine: {0}")]
    InitializationError(String),

    #[error("Failed to process image: {0}")]
    ProcessingError(String),

    #[error("Preprocessing failed: {0}")]
    PreprocessingError(String),

    #[error("Failed to decode {side} image: {reason}")]
    InvalidImage { side: &'static str, reason: String },

    #[error("{side} image too large (max: {max} bytes)")]
    ImageTooLarge { side: &'static str, max: usize },

    #[error("Request body too large (max: {max} bytes per image)")]
    RequestTooLarge { max: usize },

    #[error("Both front and back images are required.")]
    MissingImage,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OcrError {
    pub fn code(&self) -> &'static str {
        match self {
            OcrError::InitializationError(_) => "INIT_ERROR",
            OcrError::ProcessingError(_) => "PROCESSING_ERROR",
            OcrError::PreprocessingError(_) => "PREPROCESSING_ERROR",
            OcrError::InvalidImage { .. } => "INVALID_IMAGE",
            OcrError::ImageTooLarge { .. } | OcrError::RequestTooLarge { .. } => {
                "IMAGE_TOO_LARGE"
            }
            OcrError::MissingImage => "MISSING_IMAGE",
            OcrError::InvalidRequest(_) => "INVALID_REQUEST",
            OcrError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            OcrError::InitializationError(_)
            | OcrError::ProcessingError(_)
            | OcrError::PreprocessingError(_)
            | OcrError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            OcrError::InvalidImage { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            OcrError::ImageTooLarge { .. } | OcrError::RequestTooLarge { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            OcrError::MissingImage | OcrError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for OcrError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        });

        (status, body).into_response()
    }
}
