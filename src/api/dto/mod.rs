//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `notification` - Send requests and their responses
//! - `health` - Health and readiness checks
//! - `error` - Common error response DTOs

mod error;
mod health;
mod notification;

pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus, ReadinessResponse};
pub use notification::{
    MAX_MULTICAST_TOKENS, NotificationResponse, ProjectQuery, SendMulticastNotificationRequest,
    SendNotificationRequest,
};
