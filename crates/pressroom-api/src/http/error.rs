//! Application error type mapping to HTTP status codes.
//!
//! Every error body is `{"error": "<message>"}`. Internal details are logged
//! and replaced by the fixed public message of their variant.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use pressroom_types::error::{ActionError, AuthError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Webhook secret missing or wrong.
    InvalidSecret,
    /// Cache invalidation or webhook body parsing failed.
    RevalidationFailed(String),
    /// `CHAIBUILDER_APP_KEY` is not configured.
    MissingAppKey,
    /// Bearer token rejected by the auth provider.
    InvalidToken,
    /// The action itself failed.
    Action(ActionError),
    /// Anything else; the detail is logged, not returned.
    Internal(String),
}

impl From<ActionError> for AppError {
    fn from(e: ActionError) -> Self {
        AppError::Action(e)
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken | AuthError::InvalidToken(_) => AppError::InvalidToken,
            AuthError::Provider(_) | AuthError::NotConfigured => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidSecret => (StatusCode::UNAUTHORIZED, "Invalid secret".to_string()),
            AppError::RevalidationFailed(detail) => {
                tracing::error!(error = %detail, "revalidation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to revalidate tags and paths".to_string(),
                )
            }
            AppError::MissingAppKey => {
                tracing::error!("CHAIBUILDER_APP_KEY environment variable is not set");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server misconfiguration: CHAIBUILDER_APP_KEY is not set".to_string(),
                )
            }
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Invalid or expired token".to_string())
            }
            AppError::Action(e) => {
                let status = StatusCode::from_u16(e.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status.is_server_error() {
                    tracing::error!(error = %e, "action failed");
                } else {
                    tracing::debug!(error = %e, "action rejected");
                }
                (status, e.to_string())
            }
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
