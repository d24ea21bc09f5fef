use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::access::{NOT_AUTHORIZED_PATH, SIGN_IN_PATH};
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Forbidden")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("AI upstream error: {0}")]
    AiUpstream(String),

    #[error("AI reply rejected: {0}")]
    AiMalformedReply(String),

    #[error("S3 error: {0}")]
    S3(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Http(_) | LlmError::Api { .. } => AppError::AiUpstream(e.to_string()),
            LlmError::Parse(_) | LlmError::EmptyContent => {
                AppError::AiMalformedReply(e.to_string())
            }
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut redirect = None;
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Unauthenticated => {
                redirect = Some(SIGN_IN_PATH);
                (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHENTICATED",
                    "Sign in to continue".to_string(),
                )
            }
            AppError::Forbidden => {
                redirect = Some(NOT_AUTHORIZED_PATH);
                (
                    StatusCode::FORBIDDEN,
                    "FORBIDDEN",
                    "Your role does not have access to this resource".to_string(),
                )
            }
            AppError::Database(e) => database_failure(e),
            AppError::AiUpstream(msg) => {
                tracing::error!("AI upstream error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "AI_UPSTREAM_ERROR",
                    "The AI service could not be reached".to_string(),
                )
            }
            AppError::AiMalformedReply(msg) => {
                tracing::error!("AI reply rejected: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "AI_MALFORMED_REPLY",
                    format!("The AI service returned an unusable reply: {msg}"),
                )
            }
            AppError::S3(msg) => {
                tracing::error!("S3 error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
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
        if let Some(target) = redirect {
            error["redirect"] = json!(target);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

/// Maps store failures to a status and a message a person can act on.
/// Constraint violations are the caller's problem; anything else is ours.
fn database_failure(e: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if let Some(db_err) = e.as_database_error() {
        let constraint = db_err.constraint().unwrap_or("a table constraint");
        if db_err.is_unique_violation() {
            return (
                StatusCode::CONFLICT,
                "DUPLICATE_RECORD",
                format!("A record with the same value already exists ({constraint})"),
            );
        }
        if db_err.is_foreign_key_violation() {
            return (
                StatusCode::BAD_REQUEST,
                "UNKNOWN_REFERENCE",
                format!("The record refers to something that does not exist ({constraint})"),
            );
        }
        if db_err.is_check_violation() {
            return (
                StatusCode::BAD_REQUEST,
                "CONSTRAINT_VIOLATION",
                format!("The record violates {constraint}"),
            );
        }
    }
    tracing::error!("Database error: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "DATABASE_ERROR",
        "A database error occurred".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_unauthenticated_redirects_to_sign_in() {
        let (status, body) = body_json(AppError::Unauthenticated).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["redirect"], "/auth");
    }

    #[tokio::test]
    async fn test_forbidden_redirects_to_not_authorized() {
        let (status, body) = body_json(AppError::Forbidden).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["redirect"], "/not-authorized");
    }

    #[tokio::test]
    async fn test_validation_error_keeps_message() {
        let (status, body) =
            body_json(AppError::Validation("title is required".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "title is required");
        assert!(body["error"].get("redirect").is_none());
    }

    #[tokio::test]
    async fn test_ai_failures_have_distinct_codes() {
        let (upstream_status, upstream) =
            body_json(AppError::AiUpstream("connection refused".to_string())).await;
        let (malformed_status, malformed) =
            body_json(AppError::AiMalformedReply("score out of range".to_string())).await;
        assert_eq!(upstream_status, StatusCode::BAD_GATEWAY);
        assert_eq!(malformed_status, StatusCode::BAD_GATEWAY);
        assert_ne!(upstream["error"]["code"], malformed["error"]["code"]);
    }

    #[test]
    fn test_llm_errors_split_into_upstream_and_malformed() {
        let api = LlmError::Api {
            status: 503,
            message: "overloaded".to_string(),
        };
        assert!(matches!(AppError::from(api), AppError::AiUpstream(_)));
        assert!(matches!(
            AppError::from(LlmError::EmptyContent),
            AppError::AiMalformedReply(_)
        ));
        let parse = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert!(matches!(
            AppError::from(LlmError::Parse(parse)),
            AppError::AiMalformedReply(_)
        ));
    }
}
