//! Shared JSON error body and error-to-status mapping for the REST API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::application::handlers::SendMessageError;
use crate::application::routing::RouteError;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Mapping
// ════════════════════════════════════════════════════════════════════════════════

/// API error mapped onto an HTTP status.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err.code() {
            ErrorCode::ValidationFailed => ApiError::BadRequest(err.message),
            ErrorCode::UserNotFound | ErrorCode::ConversationNotFound => {
                ApiError::NotFound(err.message)
            }
            ErrorCode::DatabaseError | ErrorCode::InternalError => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<SendMessageError> for ApiError {
    fn from(err: SendMessageError) -> Self {
        match err {
            SendMessageError::EmptyMessage => {
                ApiError::BadRequest("Message and userId are required".to_string())
            }
            SendMessageError::ConversationNotFound(_) => {
                ApiError::NotFound("Conversation not found".to_string())
            }
            SendMessageError::Routing(RouteError::DataAccess(e)) => {
                ApiError::Internal(format!("Failed to process message: {}", e))
            }
            SendMessageError::Repository(e) => ApiError::from(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::not_found(msg)),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal("Internal server error"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ConversationId;
    use crate::ports::DataAccessError;

    #[test]
    fn error_response_omits_missing_details() {
        let json = serde_json::to_value(ErrorResponse::bad_request("userId is required")).unwrap();
        assert_eq!(json["code"], "BAD_REQUEST");
        assert_eq!(json["message"], "userId is required");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn error_response_carries_details() {
        let error = ErrorResponse::bad_request("bad")
            .with_details(serde_json::json!({ "field": "message" }));
        let json = serde_json::to_value(error).unwrap();
        assert_eq!(json["details"]["field"], "message");
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::validation("message", "empty"), StatusCode::BAD_REQUEST),
            (
                DomainError::new(ErrorCode::ConversationNotFound, "gone"),
                StatusCode::NOT_FOUND,
            ),
            (
                DomainError::new(ErrorCode::UserNotFound, "who"),
                StatusCode::NOT_FOUND,
            ),
            (DomainError::database("down"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn send_message_errors_map_to_statuses() {
        let cases = [
            (SendMessageError::EmptyMessage, StatusCode::BAD_REQUEST),
            (
                SendMessageError::ConversationNotFound(ConversationId::new()),
                StatusCode::NOT_FOUND,
            ),
            (
                SendMessageError::Routing(RouteError::DataAccess(DataAccessError::database("x"))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }
}
