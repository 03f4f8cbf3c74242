//! Error handling for the Reel HTTP layer

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

/// Application error types that map to HTTP responses.
///
/// Every variant renders as a plain-text body of the message followed by a
/// newline, never as a structured object.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    #[error("bad request: {message}")]
    BadRequest { message: String, code: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: "bad_request".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::now_v7();
        let status = self.status();

        let message = match self {
            AppError::NotFound { message, code } | AppError::BadRequest { message, code } => {
                tracing::warn!(
                    error_id = %error_id,
                    error_code = %code,
                    status_code = %status.as_u16(),
                    "Request rejected"
                );
                message
            }
            AppError::Internal(e) => {
                tracing::error!(
                    error_id = %error_id,
                    error_code = "internal_error",
                    status_code = %status.as_u16(),
                    error = %format!("{e:#}"),
                    "Request error"
                );
                // Hide internal details outside debug builds
                if cfg!(debug_assertions) {
                    e.to_string()
                } else {
                    "Internal Server Error".to_string()
                }
            }
        };

        (
            status,
            [(header::X_CONTENT_TYPE_OPTIONS, "nosniff")],
            format!("{message}\n"),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_error_codes() {
        match AppError::not_found("Movie Not Found") {
            AppError::NotFound { code, message } => {
                assert_eq!(code, "not_found");
                assert_eq!(message, "Movie Not Found");
            }
            _ => panic!("Expected NotFound error"),
        }

        match AppError::bad_request("Bad Request") {
            AppError::BadRequest { code, .. } => assert_eq!(code, "bad_request"),
            _ => panic!("Expected BadRequest error"),
        }
    }

    #[tokio::test]
    async fn test_not_found_renders_plain_text() {
        let response = AppError::not_found("Movie Not Found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(
            response.headers()[header::X_CONTENT_TYPE_OPTIONS],
            "nosniff"
        );
        assert_eq!(body_text(response).await, "Movie Not Found\n");
    }

    #[tokio::test]
    async fn test_bad_request_renders_plain_text() {
        let response = AppError::bad_request("Bad Request").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Bad Request\n");
    }

    #[test]
    fn test_internal_error_mapping() {
        let internal_error = anyhow::anyhow!("id space exhausted");
        let error = AppError::from(internal_error);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
