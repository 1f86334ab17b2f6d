use std::path::PathBuf;

use thiserror::Error;

use super::messaging::MessagingError;

/// Why a notification could not be dispatched
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No `firebase.projects.<project>` entry
    #[error("no credentials configured for project '{project}'")]
    Configuration { project: String },

    #[error("credentials for project '{project}' at {} are unusable: {reason}", path.display())]
    InvalidCredentials {
        project: String,
        path: PathBuf,
        reason: String,
    },

    #[error("delivery failed for project '{project}': {source}")]
    Provider {
        project: String,
        #[source]
        source: MessagingError,
    },
}

impl DispatchError {
    pub fn project(&self) -> &str {
        match self {
            DispatchError::Configuration { project }
            | DispatchError::InvalidCredentials { project, .. }
            | DispatchError::Provider { project, .. } => project,
        }
    }
}
