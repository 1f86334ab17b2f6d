//! Notification DTOs for API requests and responses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::services::notifications::NotificationRequest;

/// Request to push a notification to one device
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "token": "fcm-registration-token",
    "title": "Order shipped",
    "body": "Your order #42 is on its way",
    "extraData": {"orderId": "42"},
    "app": "shop"
}))]
pub struct SendNotificationRequest {
    /// Device registration token
    #[validate(custom(function = "validate_not_blank", message = "Token is required"))]
    pub token: String,

    #[validate(custom(function = "validate_not_blank", message = "Title is required"))]
    pub title: String,

    #[validate(custom(function = "validate_not_blank", message = "Body is required"))]
    pub body: String,

    /// Custom key/value payload; null values are sent as empty strings
    #[serde(default)]
    #[schema(value_type = Option<HashMap<String, String>>)]
    pub extra_data: Option<HashMap<String, Option<String>>>,

    /// Project to send through; overrides the `app` query parameter
    #[serde(default)]
    pub app: Option<String>,
}

impl SendNotificationRequest {
    pub fn into_request(self, query_app: Option<String>) -> NotificationRequest {
        NotificationRequest::single(self.token, self.title, self.body)
            .with_project(requested_project(self.app, query_app))
            .with_extra_data(self.extra_data)
    }
}

/// Request to push the same notification to several devices
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "tokens": ["token-1", "token-2"],
    "title": "Flash sale",
    "body": "Everything 20% off today",
    "app": "shop"
}))]
pub struct SendMulticastNotificationRequest {
    #[validate(
        length(
            min = 1,
            max = 500,
            message = "Between 1 and 500 tokens are required"
        ),
        custom(function = "validate_tokens")
    )]
    pub tokens: Vec<String>,

    #[validate(custom(function = "validate_not_blank", message = "Title is required"))]
    pub title: String,

    #[validate(custom(function = "validate_not_blank", message = "Body is required"))]
    pub body: String,

    #[serde(default)]
    #[schema(value_type = Option<HashMap<String, String>>)]
    pub extra_data: Option<HashMap<String, Option<String>>>,

    #[serde(default)]
    pub app: Option<String>,
}

impl SendMulticastNotificationRequest {
    pub fn into_request(self, query_app: Option<String>) -> NotificationRequest {
        NotificationRequest::multicast(self.tokens, self.title, self.body)
            .with_project(requested_project(self.app, query_app))
            .with_extra_data(self.extra_data)
    }
}

/// Largest token list accepted by the multicast endpoint
pub const MAX_MULTICAST_TOKENS: usize = 500;

/// Body `app` first, then the query; blank values count as absent
fn requested_project(body_app: Option<String>, query_app: Option<String>) -> Option<String> {
    body_app
        .filter(|app| !app.trim().is_empty())
        .or_else(|| query_app.filter(|app| !app.trim().is_empty()))
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_tokens(tokens: &[String]) -> Result<(), ValidationError> {
    if tokens.iter().any(|t| t.trim().is_empty()) {
        let mut error = ValidationError::new("empty_token");
        error.message = Some("Tokens must not be empty".into());
        return Err(error);
    }
    Ok(())
}

/// `?app=<project>` on the send endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectQuery {
    /// Project name, used when the body carries no `app`
    pub app: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[schema(example = json!({"success": true, "message": "Successfully notification sent!"}))]
pub struct NotificationResponse {
    pub success: bool,
    pub message: String,
}

impl NotificationResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: "Successfully notification sent!".to_string(),
        }
    }

    pub fn multicast_sent() -> Self {
        Self {
            success: true,
            message: "Successfully multicast notification sent!".to_string(),
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            message: "Failed to send notification.".to_string(),
        }
    }
}
