use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::auth::FcmAuthenticator;
use super::client::FcmClient;
use super::types::ServiceAccountKey;
use crate::config::FcmSettings;
use crate::services::notifications::{Messaging, MessagingError, MessagingFactory};

/// Builds an authenticated [`FcmClient`] per call from a service account file.
#[derive(Debug, Clone)]
pub struct FcmMessagingFactory {
    settings: FcmSettings,
}

impl FcmMessagingFactory {
    pub fn new(settings: FcmSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl MessagingFactory for FcmMessagingFactory {
    async fn create(
        &self,
        project: &str,
        credentials: &Path,
    ) -> Result<Arc<dyn Messaging>, MessagingError> {
        let key = ServiceAccountKey::from_file(credentials).await?;
        let project_id = key.project_id.clone();

        let access_token = FcmAuthenticator::new(key, &self.settings)
            .access_token()
            .await?;

        tracing::debug!(project, firebase_project = %project_id, "FCM client ready");
        Ok(Arc::new(FcmClient::new(project_id, access_token, &self.settings)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::fcm::mock::{MockFcm, test_key};
    use crate::services::notifications::{OutboundMessage, TargetType};
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn write_key(dir: &TempDir, token_uri: &str) -> std::path::PathBuf {
        let path = dir.path().join("service-account.json");
        std::fs::write(&path, serde_json::to_string(&test_key(token_uri)).unwrap()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_create_and_send() {
        let mock = MockFcm::start().await;
        let dir = TempDir::new().unwrap();
        let path = write_key(&dir, &mock.token_uri());
        let factory = FcmMessagingFactory::new(FcmSettings {
            api_base_url: mock.base_url().to_string(),
            ..FcmSettings::default()
        });

        let messaging = factory.create("app", &path).await.unwrap();
        let report = messaging
            .send(OutboundMessage {
                target_type: TargetType::Token,
                target_value: "T1".to_string(),
                title: "Hi".to_string(),
                body: "There".to_string(),
                data: HashMap::new(),
            })
            .await
            .unwrap();

        assert!(report.message_id.starts_with("projects/demo-project/"));
        let paths: Vec<String> = mock.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/token", "/v1/projects/demo-project/messages:send"]);
    }

    #[tokio::test]
    async fn test_unparsable_key_is_credentials_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"project_id\": \"demo\"}").unwrap();

        let error = FcmMessagingFactory::new(FcmSettings::default())
            .create("app", &path)
            .await
            .err()
            .unwrap();

        assert!(matches!(error, MessagingError::Credentials(_)));
    }

    #[tokio::test]
    async fn test_rejected_auth_is_provider_error() {
        let mock = MockFcm::start_rejecting_auth().await;
        let dir = TempDir::new().unwrap();
        let path = write_key(&dir, &mock.token_uri());

        let error = FcmMessagingFactory::new(FcmSettings::default())
            .create("app", &path)
            .await
            .err()
            .unwrap();

        assert!(matches!(error, MessagingError::Provider(_)));
    }
}
