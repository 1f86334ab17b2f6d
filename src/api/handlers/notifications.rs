//! Notification API handlers.
//!
//! The project is taken from the body `app` field, then the `app` query
//! parameter, then the configured default.

use axum::{
    Json,
    extract::{Query, State},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::NOTIFICATION_TAG;
use crate::api::dto::{
    ErrorResponse, NotificationResponse, ProjectQuery, SendMulticastNotificationRequest,
    SendNotificationRequest,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// Routes:
/// - POST /send-notification           - Send to one device token
/// - POST /send-multicast-notification - Send to a list of device tokens
pub fn notification_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(send_notification))
        .routes(routes!(send_multicast_notification))
}

#[utoipa::path(
    post,
    path = "/send-notification",
    tag = NOTIFICATION_TAG,
    params(ProjectQuery),
    request_body = SendNotificationRequest,
    responses(
        (status = 200, description = "Notification accepted by FCM", body = NotificationResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Delivery failed", body = NotificationResponse,
            example = json!({"success": false, "message": "Failed to send notification."})),
        (status = 504, description = "Request exceeded the server timeout")
    )
)]
async fn send_notification(
    State(state): State<AppState>,
    Query(query): Query<ProjectQuery>,
    ValidatedJson(payload): ValidatedJson<SendNotificationRequest>,
) -> AppResult<Json<NotificationResponse>> {
    let request = payload.into_request(query.app);
    state.services.notifications.dispatch(request).await?;
    Ok(Json(NotificationResponse::sent()))
}

/// Multicast send. Per-token failures do not fail the request.
#[utoipa::path(
    post,
    path = "/send-multicast-notification",
    tag = NOTIFICATION_TAG,
    params(ProjectQuery),
    request_body = SendMulticastNotificationRequest,
    responses(
        (status = 200, description = "Multicast dispatched", body = NotificationResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Delivery failed", body = NotificationResponse),
        (status = 504, description = "Request exceeded the server timeout")
    )
)]
async fn send_multicast_notification(
    State(state): State<AppState>,
    Query(query): Query<ProjectQuery>,
    ValidatedJson(payload): ValidatedJson<SendMulticastNotificationRequest>,
) -> AppResult<Json<NotificationResponse>> {
    let request = payload.into_request(query.app);
    state.services.notifications.dispatch(request).await?;
    Ok(Json(NotificationResponse::multicast_sent()))
}
