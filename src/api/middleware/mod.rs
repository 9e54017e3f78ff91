//! Middleware components for request processing.

mod error_handler;
mod logging;
mod request_id;

pub use error_handler::rejection_response;
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
