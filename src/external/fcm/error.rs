use thiserror::Error;

use crate::services::notifications::MessagingError;

#[derive(Debug, Error)]
pub enum FcmError {
    #[error("Failed to read service account key: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid service account key: {0}")]
    InvalidKey(String),

    #[error("Failed to parse private key: {0}")]
    PrivateKey(#[source] jsonwebtoken::errors::Error),

    #[error("Failed to sign assertion: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("FCM request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Token request failed with status {status}: {body}")]
    TokenExchange { status: u16, body: String },

    /// Non-2xx from the send endpoint, `message` taken from the error body when present
    #[error("FCM API error {status}: {message}")]
    Api { status: u16, message: String },
}

impl From<FcmError> for MessagingError {
    fn from(error: FcmError) -> Self {
        match error {
            FcmError::Io(_) | FcmError::InvalidKey(_) | FcmError::PrivateKey(_) => {
                MessagingError::Credentials(error.to_string())
            }
            other => MessagingError::Provider(anyhow::Error::new(other)),
        }
    }
}
