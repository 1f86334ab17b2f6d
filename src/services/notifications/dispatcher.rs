use std::sync::Arc;

use crate::config::FirebaseConfig;

use super::credentials::CredentialResolver;
use super::error::DispatchError;
use super::message::build_message;
use super::messaging::{BatchReport, MessagingFactory, SendReport};
use super::request::{NotificationRequest, Target};

/// Provider response for a successful dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Single(SendReport),
    Multicast(BatchReport),
}

/// Resolve, build, send. One delivery call per request, no retries.
#[derive(Clone)]
pub struct Dispatcher {
    resolver: CredentialResolver,
}

impl Dispatcher {
    pub fn new(firebase: Arc<FirebaseConfig>, factory: Arc<dyn MessagingFactory>) -> Self {
        Self {
            resolver: CredentialResolver::new(firebase, factory),
        }
    }

    pub async fn dispatch(&self, request: NotificationRequest) -> Result<DispatchOutcome, DispatchError> {
        let result = self.deliver(request).await;
        if let Err(e) = &result {
            tracing::error!(project = e.project(), error = %e, "Notification failed");
        }
        result
    }

    async fn deliver(&self, request: NotificationRequest) -> Result<DispatchOutcome, DispatchError> {
        let project = self
            .resolver
            .firebase()
            .project_name(request.project.as_deref())
            .to_string();
        let messaging = self.resolver.resolve(Some(&project)).await?;
        let message = build_message(&request);

        let provider_error = |source| DispatchError::Provider {
            project: project.clone(),
            source,
        };

        match &request.target {
            Target::Single(_) => {
                let report = messaging.send(message).await.map_err(provider_error)?;
                tracing::info!(project = %project, message_id = %report.message_id, "Notification sent");
                Ok(DispatchOutcome::Single(report))
            }
            Target::Multicast(tokens) => {
                let report = messaging
                    .send_multicast(message, tokens)
                    .await
                    .map_err(provider_error)?;
                if report.failure_count > 0 {
                    tracing::warn!(
                        project = %project,
                        tokens = tokens.len(),
                        success = report.success_count,
                        failure = report.failure_count,
                        "Multicast notification partially failed"
                    );
                } else {
                    tracing::info!(project = %project, tokens = tokens.len(), "Multicast notification sent");
                }
                Ok(DispatchOutcome::Multicast(report))
            }
        }
    }
}
