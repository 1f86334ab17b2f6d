//! In-memory messaging fakes shared by service and handler tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::message::OutboundMessage;
use super::messaging::{
    BatchReport, Messaging, MessagingError, MessagingFactory, SendReport, TokenReport,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FactoryBehavior {
    #[default]
    Succeed,
    /// `create` fails as if the key file did not parse
    RejectCredentials,
    /// `create` fails as if the token exchange failed
    FailAuth,
    /// Handles are created but every send fails
    FailSend,
    /// `create` never completes
    Hang,
}

/// A delivery call observed by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentCall {
    Single {
        project: String,
        message: OutboundMessage,
    },
    Multicast {
        project: String,
        message: OutboundMessage,
        tokens: Vec<String>,
    },
}

#[derive(Default)]
pub struct RecordingFactory {
    behavior: FactoryBehavior,
    created: Mutex<Vec<(String, PathBuf)>>,
    sent: Arc<Mutex<Vec<SentCall>>>,
}

impl RecordingFactory {
    pub fn with_behavior(behavior: FactoryBehavior) -> Self {
        Self {
            behavior,
            ..Self::default()
        }
    }

    pub fn created(&self) -> Vec<(String, PathBuf)> {
        self.created.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<SentCall> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagingFactory for RecordingFactory {
    async fn create(
        &self,
        project: &str,
        credentials: &Path,
    ) -> Result<Arc<dyn Messaging>, MessagingError> {
        self.created
            .lock()
            .unwrap()
            .push((project.to_string(), credentials.to_path_buf()));

        match self.behavior {
            FactoryBehavior::Hang => std::future::pending().await,
            FactoryBehavior::RejectCredentials => Err(MessagingError::Credentials(
                "missing field `private_key`".to_string(),
            )),
            FactoryBehavior::FailAuth => Err(MessagingError::Provider(anyhow::anyhow!(
                "token exchange failed: 401 Unauthorized"
            ))),
            behavior => Ok(Arc::new(RecordingMessaging {
                project: project.to_string(),
                fail: behavior == FactoryBehavior::FailSend,
                sent: self.sent.clone(),
            })),
        }
    }
}

struct RecordingMessaging {
    project: String,
    fail: bool,
    sent: Arc<Mutex<Vec<SentCall>>>,
}

#[async_trait]
impl Messaging for RecordingMessaging {
    async fn send(&self, message: OutboundMessage) -> Result<SendReport, MessagingError> {
        self.sent.lock().unwrap().push(SentCall::Single {
            project: self.project.clone(),
            message,
        });
        if self.fail {
            return Err(anyhow::anyhow!("FCM returned 404: UNREGISTERED").into());
        }
        Ok(SendReport {
            message_id: format!("projects/{}/messages/1", self.project),
        })
    }

    async fn send_multicast(
        &self,
        message: OutboundMessage,
        tokens: &[String],
    ) -> Result<BatchReport, MessagingError> {
        self.sent.lock().unwrap().push(SentCall::Multicast {
            project: self.project.clone(),
            message,
            tokens: tokens.to_vec(),
        });
        if self.fail {
            return Err(anyhow::anyhow!("FCM unreachable").into());
        }
        Ok(BatchReport::from_responses(
            tokens
                .iter()
                .enumerate()
                .map(|(i, token)| {
                    TokenReport::delivered(token, format!("projects/{}/messages/{}", self.project, i))
                })
                .collect(),
        ))
    }
}
