//! Command handlers for CLI operations

pub mod invoke;
pub mod serve;

pub use invoke::InvokeCommandHandler;
pub use serve::ServeCommandHandler;
