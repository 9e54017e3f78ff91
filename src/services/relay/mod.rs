//! Webhook relay service.
//!
//! Turns one inbound body into at most one outbound notification and a
//! gateway-shaped response.

pub mod message;
pub mod payload;
mod relay_service;

pub use relay_service::RelayService;
