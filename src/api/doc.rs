use utoipa::OpenApi;

pub const HEALTH_TAG: &str = "Health";
pub const NOTIFICATION_TAG: &str = "Notifications";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pushgate",
        description = "Push notification gateway for Firebase Cloud Messaging",
    ),
    components(schemas(crate::api::dto::ErrorResponse)),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = NOTIFICATION_TAG, description = "Single and multicast push notifications"),
    )
)]
pub struct ApiDoc;
