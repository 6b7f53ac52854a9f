use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use thyroid_inferences::InferenceError;

use crate::models::ApiResponse;

/// A submitted value the form widgets would not have produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("age must be between {min} and {max} (got {age})")]
    AgeOutOfRange { age: u32, min: u32, max: u32 },
    #[error("{field} must be 0 or 1 (got {value})")]
    InvalidFlag { field: &'static str, value: u8 },
    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f32 },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error("inference worker failed: {0}")]
    Blocking(#[from] BlockingError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Inference(_) | AppError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::error(&self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::Value;

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let resp = err.error_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body()).await.expect("body");
        (status, serde_json::from_slice(&bytes).expect("json"))
    }

    #[actix_web::test]
    async fn validation_errors_are_bad_requests() {
        let err = AppError::from(ValidationError::InvalidFlag {
            field: "sick",
            value: 4,
        });
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "sick must be 0 or 1 (got 4)");
        assert!(body["data"].is_null());
    }

    #[actix_web::test]
    async fn inference_errors_are_server_errors() {
        let (status, body) = body_of(AppError::from(InferenceError::EmptyOutput)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "model produced no output");
        assert!(body["timestamp"].is_string());
    }
}
