//! Outbound integrations.

pub mod client;
pub mod fcm;

pub use client::HTTP_CLIENT;
