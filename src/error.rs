use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::{
    ERR_INTERNAL, ERR_INVALID_CREDENTIALS, ERR_INVALID_TOKEN, ERR_NO_TOKEN,
    ERR_PLATFORM_NOT_FOUND, ERR_RATE_LIMITED,
};
use crate::routes::validation::FieldViolation;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Document encoding error: {0}")]
    Document(#[from] serde_json::Error),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Token issue error: {0}")]
    TokenIssue(jsonwebtoken::errors::Error),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    /// Body, query string or path that the extractor could not parse
    #[error("Invalid request ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("No token provided")]
    NoToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Platform not found")]
    PlatformNotFound,

    #[error("Rate limit exceeded")]
    RateLimitExceeded { retry_after_secs: u64 },
}

impl AppError {
    /// HTTP status this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Rejected { status, .. } => *status,
            AppError::Validation(_)
            | AppError::InvalidToken
            | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::NoToken => StatusCode::UNAUTHORIZED,
            AppError::PlatformNotFound => StatusCode::NOT_FOUND,
            AppError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self);
        } else {
            tracing::warn!("Request rejected ({}): {}", status.as_u16(), self);
        }

        let message = match self {
            AppError::Validation(_) => "Validation failed".to_string(),
            AppError::Rejected { ref message, .. } => format!("Invalid request: {}", message),
            AppError::NoToken => ERR_NO_TOKEN.to_string(),
            AppError::InvalidToken => ERR_INVALID_TOKEN.to_string(),
            AppError::InvalidCredentials => ERR_INVALID_CREDENTIALS.to_string(),
            AppError::PlatformNotFound => ERR_PLATFORM_NOT_FOUND.to_string(),
            AppError::RateLimitExceeded { .. } => ERR_RATE_LIMITED.to_string(),
            _ => ERR_INTERNAL.to_string(),
        };

        let body = match self {
            AppError::Validation(ref violations) => json!({
                "success": false,
                "message": message,
                "errors": violations,
            }),
            _ => json!({
                "success": false,
                "message": message,
            }),
        };

        let mut response = (status, Json(body)).into_response();

        if let AppError::RateLimitExceeded { retry_after_secs } = self {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }

        response
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_generic_server_error() {
        let (status, body) = body_of(AppError::EmailTaken).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], ERR_INTERNAL);
    }

    #[tokio::test]
    async fn test_auth_errors_status_codes() {
        let (status, body) = body_of(AppError::NoToken).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], ERR_NO_TOKEN);

        let (status, body) = body_of(AppError::InvalidToken).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], ERR_INVALID_TOKEN);
    }

    #[tokio::test]
    async fn test_validation_error_lists_every_violation() {
        let violations = vec![
            FieldViolation::new("name", "Name is required"),
            FieldViolation::new("email", "Please include a valid email"),
        ];
        let (status, body) = body_of(AppError::Validation(violations)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
        assert_eq!(body["errors"][0]["field"], "name");
        assert_eq!(body["errors"][1]["message"], "Please include a valid email");
    }

    #[tokio::test]
    async fn test_rejection_keeps_its_status() {
        let (status, body) = body_of(AppError::Rejected {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "length limit exceeded".to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid request: length limit exceeded");
    }

    #[test]
    fn test_rate_limit_sets_retry_after() {
        let response = AppError::RateLimitExceeded {
            retry_after_secs: 42,
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "42");
    }
}
