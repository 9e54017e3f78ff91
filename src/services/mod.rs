//! Service layer.
//!
//! `relay` holds the invocation logic; `notifications` the outbound
//! transport it delivers through.

pub mod notifications;
pub mod relay;

pub use notifications::{NotificationProvider, SlackProvider};
pub use relay::RelayService;
