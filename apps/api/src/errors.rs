use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as an `{ "error", "details" }` body — the shape the
/// form client displays verbatim.
#[derive(Debug, Error)]
pub enum AppError {
    /// The inbound request is missing something only the caller can fix.
    #[error("{error}: {details}")]
    Validation { error: String, details: String },

    /// Both generation attempts exhausted; carries the last attempt's error text.
    #[error("invalid JSON from AI after retries: {0}")]
    Generation(String),

    /// A document-store call failed; the upstream status passes through.
    #[error("Notion API error ({operation}): {details}")]
    DocumentStore {
        operation: &'static str,
        status: u16,
        details: String,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(error: impl Into<String>, details: impl Into<String>) -> Self {
        AppError::Validation {
            error: error.into(),
            details: details.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::Validation { error, details } => (StatusCode::BAD_REQUEST, error, details),
            AppError::Generation(details) => {
                tracing::error!("Generation failed: {details}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Invalid JSON from AI after retries".to_string(),
                    details,
                )
            }
            AppError::DocumentStore {
                operation,
                status,
                details,
            } => {
                tracing::error!("Notion API error ({operation}), status {status}: {details}");
                (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    format!("Notion API error ({operation})"),
                    details,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    e.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error,
            "details": details
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_is_400_with_error_and_details() {
        let response = AppError::validation(
            "Missing Notion token",
            "Provide a Notion integration token",
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing Notion token");
        assert_eq!(body["details"], "Provide a Notion integration token");
    }

    #[tokio::test]
    async fn test_generation_error_is_500_with_last_attempt_details() {
        let response = AppError::Generation("expected value at line 1".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid JSON from AI after retries");
        assert_eq!(body["details"], "expected value at line 1");
    }

    #[tokio::test]
    async fn test_document_store_error_passes_upstream_status_through() {
        let response = AppError::DocumentStore {
            operation: "Create Page",
            status: 404,
            details: "database not found".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Notion API error (Create Page)");
        assert_eq!(body["details"], "database not found");
    }

    #[tokio::test]
    async fn test_document_store_error_with_bogus_status_falls_back_to_502() {
        let response = AppError::DocumentStore {
            operation: "Append",
            status: 0,
            details: "connection reset".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
