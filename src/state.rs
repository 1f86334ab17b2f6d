//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::Settings;
use crate::services::Services;
use crate::services::notifications::MessagingFactory;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since everything inside is reference counted.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Settings loaded at startup, read-only afterwards
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Creates a new AppState from settings and the messaging backend.
    ///
    /// # Example
    /// ```ignore
    /// let factory = Arc::new(FcmMessagingFactory::new(settings.firebase.fcm.clone()));
    /// let state = AppState::new(settings, factory);
    /// ```
    pub fn new(settings: Settings, factory: Arc<dyn MessagingFactory>) -> Self {
        let settings = Arc::new(settings);
        let services = Services::new(Arc::new(settings.firebase.clone()), factory);
        Self { services, settings }
    }
}
