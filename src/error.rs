use actix_web::{error::JsonPayloadError, http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::model::ErrorResponse;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Text input cannot be empty")]
    EmptyText,

    #[error("Batch input cannot be empty")]
    EmptyBatch,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Could not load model {identifier}: {reason}")]
    ModelLoad { identifier: String, reason: String },

    #[error("Could not embed input: {0}")]
    Inference(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("Blocking task failed: {0}")]
    Blocking(String),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::EmptyText | ServiceError::EmptyBatch => StatusCode::BAD_REQUEST,
            ServiceError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            detail: self.to_string(),
        })
    }
}

impl From<JsonPayloadError> for ServiceError {
    fn from(err: JsonPayloadError) -> Self {
        match err {
            JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                ServiceError::PayloadTooLarge(err.to_string())
            }
            _ => ServiceError::InvalidBody(err.to_string()),
        }
    }
}

impl From<actix_web::error::BlockingError> for ServiceError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        ServiceError::Blocking(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
