//! Validated input to the dispatch pipeline.

use std::collections::HashMap;

/// Delivery target of a notification request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// One device registration token
    Single(String),
    /// Several tokens delivered in one multicast call
    Multicast(Vec<String>),
}

/// A notification to deliver through the project named by `project`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    /// Falls back to the configured default project when `None`
    pub project: Option<String>,
    pub title: String,
    pub body: String,
    pub target: Target,
    pub extra_data: Option<HashMap<String, Option<String>>>,
}

impl NotificationRequest {
    pub fn single(token: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            project: None,
            title: title.into(),
            body: body.into(),
            target: Target::Single(token.into()),
            extra_data: None,
        }
    }

    pub fn multicast(tokens: Vec<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            project: None,
            title: title.into(),
            body: body.into(),
            target: Target::Multicast(tokens),
            extra_data: None,
        }
    }

    pub fn with_project(mut self, project: Option<String>) -> Self {
        self.project = project;
        self
    }

    pub fn with_extra_data(mut self, extra_data: Option<HashMap<String, Option<String>>>) -> Self {
        self.extra_data = extra_data;
        self
    }
}
