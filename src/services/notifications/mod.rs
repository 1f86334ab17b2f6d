//! Notification dispatch: credential resolution, message building and delivery.
//!
//! The delivery client sits behind the [`Messaging`] and [`MessagingFactory`]
//! traits so the pipeline never depends on a concrete provider.

mod credentials;
mod dispatcher;
mod error;
mod message;
mod messaging;
mod request;

#[cfg(test)]
pub(crate) mod testing;

pub use credentials::{CredentialResolver, verify_readable};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::DispatchError;
pub use message::{OutboundMessage, TargetType, build_message};
pub use messaging::{
    BatchReport, Messaging, MessagingError, MessagingFactory, SendReport, TokenReport,
};
pub use request::{NotificationRequest, Target};
