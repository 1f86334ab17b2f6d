//! Project name to messaging handle resolution.

use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::config::FirebaseConfig;

use super::error::DispatchError;
use super::messaging::{Messaging, MessagingError, MessagingFactory};

/// Turns a project name into a freshly authenticated messaging handle.
///
/// Nothing is cached: every call re-checks the credentials file and asks the
/// factory for a new handle.
#[derive(Clone)]
pub struct CredentialResolver {
    firebase: Arc<FirebaseConfig>,
    factory: Arc<dyn MessagingFactory>,
}

impl CredentialResolver {
    pub fn new(firebase: Arc<FirebaseConfig>, factory: Arc<dyn MessagingFactory>) -> Self {
        Self { firebase, factory }
    }

    pub fn firebase(&self) -> &FirebaseConfig {
        &self.firebase
    }

    pub async fn resolve(&self, project: Option<&str>) -> Result<Arc<dyn Messaging>, DispatchError> {
        let project = self.firebase.project_name(project);

        let Some(path) = self.firebase.credentials_path(project) else {
            return Err(DispatchError::Configuration {
                project: project.to_string(),
            });
        };

        if let Err(e) = verify_readable(&path).await {
            return Err(DispatchError::InvalidCredentials {
                project: project.to_string(),
                path,
                reason: e.to_string(),
            });
        }

        tracing::debug!(project, path = %path.display(), "Creating messaging handle");

        self.factory
            .create(project, &path)
            .await
            .map_err(|e| match e {
                MessagingError::Credentials(reason) => DispatchError::InvalidCredentials {
                    project: project.to_string(),
                    path,
                    reason,
                },
                source @ MessagingError::Provider(_) => DispatchError::Provider {
                    project: project.to_string(),
                    source,
                },
            })
    }
}

/// Check that `path` is a regular file this process can open.
pub async fn verify_readable(path: &Path) -> io::Result<()> {
    let metadata = tokio::fs::metadata(path).await?;
    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        ));
    }
    tokio::fs::File::open(path).await?;
    Ok(())
}
