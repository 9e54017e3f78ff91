//! Error responses for requests the host cannot hand to the relay.
//!
//! Relay faults never reach this module: they are folded into a
//! `ProxyResponse`. Only an unreadable invocation event ends here, as a
//! 400 JSON `ErrorResponse` tagged with the request ID.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::api::dto::ErrorResponse;

const BAD_REQUEST_CODE: &str = "BAD_REQUEST";

/// Renders a JSON body rejection as `400 BAD_REQUEST`.
pub fn rejection_response(rejection: JsonRejection, request_id: &str) -> Response {
    let message = rejection_message(&rejection);
    warn!(error = %message, request_id, "Rejected invocation event");

    let body = ErrorResponse::new(BAD_REQUEST_CODE, &message).with_request_id(request_id);
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid event: {}", err.body_text()),
        JsonRejection::JsonSyntaxError(err) => format!("JSON syntax error: {}", err.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "Missing or invalid Content-Type header, expected application/json".to_string()
        }
        other => other.body_text(),
    }
}
