//! Firebase Cloud Messaging HTTP v1 delivery client.

mod auth;
mod client;
mod error;
mod factory;
mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use auth::FcmAuthenticator;
pub use client::FcmClient;
pub use error::FcmError;
pub use factory::FcmMessagingFactory;
pub use types::ServiceAccountKey;
