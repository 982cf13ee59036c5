use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::intake::IntakeError;
use crate::notice::Notice;
use crate::wizard::step::StepLocked;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected input. The notice is returned to the client as-is.
    #[error("Validation error: {}", .0.description)]
    Validation(Notice),

    #[error("Step locked: {0}")]
    StepLocked(String),

    #[error("An analysis is already running for this session")]
    Busy,

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<IntakeError> for AppError {
    fn from(err: IntakeError) -> Self {
        AppError::Validation(err.notice())
    }
}

impl From<StepLocked> for AppError {
    fn from(err: StepLocked) -> Self {
        AppError::StepLocked(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(notice) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                notice.description.clone(),
            ),
            AppError::StepLocked(msg) => (StatusCode::CONFLICT, "STEP_LOCKED", msg.clone()),
            AppError::Busy => (
                StatusCode::CONFLICT,
                "ANALYSIS_IN_PROGRESS",
                "An analysis is already running for this session".to_string(),
            ),
            AppError::Analysis(msg) => {
                tracing::error!("Analysis error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ANALYSIS_ERROR",
                    "The analysis could not be completed".to_string(),
                )
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

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let AppError::Validation(notice) = &self {
            error["notice"] = json!(notice);
        }
        let body = Json(json!({ "error": error }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::step::Step;

    #[tokio::test]
    async fn test_validation_maps_to_400_with_notice() {
        let resp = AppError::Validation(Notice::error("Invalid file", "Please upload a PDF file."))
            .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["message"], "Please upload a PDF file.");
        assert_eq!(body["error"]["notice"]["title"], "Invalid file");
        assert_eq!(body["error"]["notice"]["variant"], "destructive");
    }

    #[tokio::test]
    async fn test_other_errors_carry_no_notice() {
        let resp = AppError::Busy.into_response();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "ANALYSIS_IN_PROGRESS");
        assert!(body["error"].get("notice").is_none());
    }

    #[test]
    fn test_busy_and_step_locked_map_to_409() {
        assert_eq!(AppError::Busy.into_response().status(), StatusCode::CONFLICT);
        let locked: AppError = StepLocked {
            step: Step::Results,
            reason: "no report yet",
        }
        .into();
        assert_eq!(locked.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_intake_error_becomes_validation_with_notice_text() {
        let err: AppError = IntakeError::UnsupportedType {
            content_type: "image/png".into(),
        }
        .into();
        match err {
            AppError::Validation(notice) => {
                assert_eq!(notice.title, "Invalid file");
                assert_eq!(notice.description, "Please upload a PDF file.");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
