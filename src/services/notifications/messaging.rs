//! Delivery client abstraction.
//!
//! The dispatcher only talks to these traits; `external::fcm` provides the
//! production implementation and tests swap in fakes.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use super::message::OutboundMessage;

/// Provider acknowledgement for a single send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendReport {
    pub message_id: String,
}

/// Outcome for one token of a multicast send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenReport {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TokenReport {
    pub fn delivered(token: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            message_id: Some(message_id.into()),
            error: None,
        }
    }

    pub fn failed(token: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            message_id: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct BatchReport {
    pub success_count: usize,
    pub failure_count: usize,
    pub responses: Vec<TokenReport>,
}

impl BatchReport {
    /// Aggregate per-token outcomes, keeping their order.
    pub fn from_responses(responses: Vec<TokenReport>) -> Self {
        let success_count = responses.iter().filter(|r| r.is_success()).count();
        Self {
            success_count,
            failure_count: responses.len() - success_count,
            responses,
        }
    }
}

#[derive(Debug, Error)]
pub enum MessagingError {
    /// The credentials file could not be turned into a messaging handle
    #[error("invalid credentials: {0}")]
    Credentials(String),

    /// Authentication, transport or provider rejection
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

/// Messaging handle bound to one project
#[async_trait]
pub trait Messaging: Send + Sync {
    async fn send(&self, message: OutboundMessage) -> Result<SendReport, MessagingError>;

    /// Deliver `message` to every token in `tokens`.
    ///
    /// Per-token failures are reported in the [`BatchReport`], not as an error.
    async fn send_multicast(
        &self,
        message: OutboundMessage,
        tokens: &[String],
    ) -> Result<BatchReport, MessagingError>;
}

/// Creates authenticated messaging handles from a credentials file.
#[async_trait]
pub trait MessagingFactory: Send + Sync {
    async fn create(
        &self,
        project: &str,
        credentials: &Path,
    ) -> Result<Arc<dyn Messaging>, MessagingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_report_counts() {
        let report = BatchReport::from_responses(vec![
            TokenReport::delivered("T1", "projects/p/messages/1"),
            TokenReport::failed("T2", "UNREGISTERED"),
            TokenReport::delivered("T3", "projects/p/messages/3"),
        ]);

        assert_eq!(report.success_count, 2);
        assert_eq!(report.failure_count, 1);
        assert_eq!(report.responses[1].token, "T2");
    }

    #[test]
    fn test_token_report_serialization_skips_empty_fields() {
        let json = serde_json::to_value(TokenReport::failed("T2", "UNREGISTERED")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"token": "T2", "error": "UNREGISTERED"})
        );
    }
}
