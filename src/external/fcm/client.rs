use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};

use super::error::FcmError;
use super::types::{FcmErrorBody, FcmRequest, FcmResponse};
use crate::config::FcmSettings;
use crate::external::HTTP_CLIENT;
use crate::services::notifications::{
    BatchReport, Messaging, MessagingError, OutboundMessage, SendReport, TokenReport,
};

/// Upper bound on concurrent send calls for one multicast request
pub const MULTICAST_CONCURRENCY: usize = 32;

/// FCM HTTP v1 client bound to one Firebase project and one access token.
pub struct FcmClient {
    project_id: String,
    access_token: String,
    send_url: String,
    timeout: Duration,
}

impl FcmClient {
    pub fn new(project_id: impl Into<String>, access_token: impl Into<String>, settings: &FcmSettings) -> Self {
        let project_id = project_id.into();
        let send_url = format!(
            "{}/v1/projects/{}/messages:send",
            settings.api_base_url.trim_end_matches('/'),
            project_id
        );

        Self {
            project_id,
            access_token: access_token.into(),
            send_url,
            timeout: Duration::from_secs(settings.request_timeout),
        }
    }

    async fn post(&self, request: &FcmRequest) -> Result<String, FcmError> {
        let response = HTTP_CLIENT
            .post(&self.send_url)
            .bearer_auth(&self.access_token)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FcmError::Api {
                status: status.as_u16(),
                message: FcmErrorBody::summarize(&body),
            });
        }

        let sent: FcmResponse = response.json().await?;
        Ok(sent.name)
    }
}

#[async_trait]
impl Messaging for FcmClient {
    async fn send(&self, message: OutboundMessage) -> Result<SendReport, MessagingError> {
        let message_id = self.post(&FcmRequest::from_message(&message)).await?;
        Ok(SendReport { message_id })
    }

    async fn send_multicast(
        &self,
        message: OutboundMessage,
        tokens: &[String],
    ) -> Result<BatchReport, MessagingError> {
        // HTTP v1 has no batch endpoint; one request per token, results in token order
        let sends: Vec<_> = tokens.iter().map(|token| {
            let request = FcmRequest::for_token(&message, token);
            async move {
                match self.post(&request).await {
                    Ok(message_id) => TokenReport::delivered(token, message_id),
                    Err(e) => {
                        tracing::debug!(project = %self.project_id, error = %e, "Multicast token failed");
                        TokenReport::failed(token, e.to_string())
                    }
                }
            }
        }).collect();

        let responses = stream::iter(sends)
            .buffered(MULTICAST_CONCURRENCY)
            .collect::<Vec<_>>()
            .await;

        Ok(BatchReport::from_responses(responses))
    }
}
