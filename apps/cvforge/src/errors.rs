use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cv::CvError;
use crate::export::ExportError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Cv(#[from] CvError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Cv(e) => cv_error_parts(e),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "Failed to get AI suggestion. Please try again.".to_string(),
                )
            }
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                match e {
                    ExportError::EmptyDocument | ExportError::TooLarge { .. } => (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "EXPORT_ERROR",
                        e.to_string(),
                    ),
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "EXPORT_ERROR",
                        "Failed to generate the PDF".to_string(),
                    ),
                }
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

fn cv_error_parts(e: &CvError) -> (StatusCode, &'static str, String) {
    let status = match e {
        CvError::EntryNotFound { .. } => StatusCode::NOT_FOUND,
        CvError::DuplicateSkill(_) => StatusCode::CONFLICT,
        CvError::PhotoTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        CvError::UnsupportedPhotoFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        CvError::FieldNotApplicable { .. } | CvError::InvalidPhoto(_) | CvError::InvalidDataUri => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    };
    let code = match e {
        CvError::EntryNotFound { .. } => "NOT_FOUND",
        CvError::DuplicateSkill(_) => "DUPLICATE_SKILL",
        CvError::FieldNotApplicable { .. } => "FIELD_NOT_APPLICABLE",
        CvError::PhotoTooLarge { .. }
        | CvError::UnsupportedPhotoFormat(_)
        | CvError::InvalidPhoto(_)
        | CvError::InvalidDataUri => "INVALID_PHOTO",
    };
    (status, code, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn parts(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_llm_error_is_bad_gateway_with_generic_message() {
        let (status, body) = parts(AppError::Llm(LlmError::Api {
            status: 401,
            message: "invalid x-api-key".to_string(),
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        assert!(!body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("x-api-key"));
    }

    #[tokio::test]
    async fn test_duplicate_skill_is_conflict() {
        let (status, body) = parts(CvError::DuplicateSkill("Rust".to_string()).into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "DUPLICATE_SKILL");
    }

    #[tokio::test]
    async fn test_export_failure_is_internal() {
        let (status, body) = parts(ExportError::EmptyRaster.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "EXPORT_ERROR");
    }

    #[tokio::test]
    async fn test_oversized_export_is_unprocessable() {
        let (status, body) = parts(ExportError::TooLarge { pages: 40, limit: 12 }.into()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "EXPORT_ERROR");
        assert_eq!(body["error"]["message"], "document needs 40 pages, limit is 12");
    }

    #[tokio::test]
    async fn test_not_found_shape() {
        let (status, body) = parts(AppError::NotFound("nope".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": {"code": "NOT_FOUND", "message": "nope"}}));
    }
}
