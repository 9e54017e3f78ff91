//! Outbound notification delivery.
//!
//! `NotificationProvider` is the transport seam used by the relay;
//! `SlackProvider` is the production implementation.

mod provider;
mod slack_provider;

pub use provider::{NotificationProvider, NotificationResult};
pub use slack_provider::SlackProvider;

#[cfg(test)]
pub(crate) mod mock_provider;
