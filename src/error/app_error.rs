use axum::extract::rejection::JsonRejection;
use thiserror::Error;

use crate::services::notifications::DispatchError;

/// Application-wide error type returned by handlers and extractors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Every field that failed `validator` checks, sorted by field name
    #[error("Validation failed: {} field(s)", errors.len())]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Well-formed JSON that does not fit the expected shape
    #[error("Unprocessable content: {message}")]
    UnprocessableContent { message: String },

    /// A notification could not be delivered
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| ValidationFieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationErrors { errors: fields }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => AppError::UnprocessableContent {
                message: err.body_text(),
            },
            other => AppError::BadRequest {
                message: other.body_text(),
            },
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
