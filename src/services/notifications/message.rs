//! Builds the provider-neutral message from a notification request.

use std::collections::HashMap;

use serde::Serialize;

use super::request::{NotificationRequest, Target};

/// How `OutboundMessage::target_value` is addressed by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Token,
    Topic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub target_type: TargetType,
    pub target_value: String,
    pub title: String,
    pub body: String,
    pub data: HashMap<String, String>,
}

/// Normalize `request` into an [`OutboundMessage`].
///
/// A multicast request is addressed as `Topic` with its first token as the
/// target value; the full token list travels separately to
/// [`Messaging::send_multicast`](super::Messaging::send_multicast). Null extra
/// data values become empty strings.
pub fn build_message(request: &NotificationRequest) -> OutboundMessage {
    let (target_type, target_value) = match &request.target {
        Target::Multicast(tokens) => (
            TargetType::Topic,
            tokens.first().cloned().unwrap_or_default(),
        ),
        Target::Single(token) => (TargetType::Token, token.clone()),
    };

    let data = request
        .extra_data
        .as_ref()
        .map(|extra| {
            extra
                .iter()
                .map(|(key, value)| (key.clone(), value.clone().unwrap_or_default()))
                .collect()
        })
        .unwrap_or_default();

    OutboundMessage {
        target_type,
        target_value,
        title: request.title.clone(),
        body: request.body.clone(),
        data,
    }
}
