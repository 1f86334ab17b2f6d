//! Service layer for business logic operations.

pub mod notifications;

use std::sync::Arc;

use crate::config::FirebaseConfig;
use notifications::{Dispatcher, MessagingFactory};

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub notifications: Dispatcher,
}

impl Services {
    pub fn new(firebase: Arc<FirebaseConfig>, factory: Arc<dyn MessagingFactory>) -> Self {
        Self {
            notifications: Dispatcher::new(firebase, factory),
        }
    }
}
