//! Error handler for converting AppError to HTTP responses.
//!
//! Dispatch failures keep the notification response shape
//! (`{"success": false, ...}`) so callers of the send endpoints only ever
//! see one body format; everything else uses [`ErrorResponse`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::{ErrorResponse, NotificationResponse};
use crate::error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            AppError::ValidationErrors { errors } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new("VALIDATION_ERROR", "Request validation failed").with_details(
                    json!(
                        errors
                            .iter()
                            .map(|e| json!({ "field": e.field, "message": e.message }))
                            .collect::<Vec<_>>()
                    ),
                ),
            ),
            AppError::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("BAD_REQUEST", message),
            ),
            AppError::UnprocessableContent { message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new("UNPROCESSABLE_CONTENT", message),
            ),
            // Already logged with its project by the dispatcher
            AppError::Dispatch(_) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(NotificationResponse::failed()),
                )
                    .into_response();
            }
            AppError::Internal { source } => {
                tracing::error!(error = ?source, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}
