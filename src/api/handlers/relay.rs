//! Relay endpoints.
//!
//! Both routes run one relay invocation per request, passing the configured
//! target URL explicitly.

use axum::{
    Extension, Json, Router,
    body::Bytes,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use crate::api::middleware::{RequestId, rejection_response};
use crate::models::{ProxyRequest, ProxyResponse};
use crate::state::AppState;

/// # Routes
/// - `POST /webhook` - raw body in, relay status and text out
/// - `POST /api/invocations` - gateway event in, `ProxyResponse` JSON out
pub fn relay_routes() -> Router<AppState> {
    Router::new()
        .route("/webhook", post(webhook))
        .route("/api/invocations", post(invoke))
}

/// Runs the relay on the raw request body and renders its response directly.
pub async fn webhook(State(state): State<AppState>, body: Bytes) -> Response {
    let raw_body = String::from_utf8_lossy(&body);
    let response = state.relay.handle(&raw_body, state.target_url()).await;
    render(response)
}

/// Runs the relay on a gateway proxy event.
///
/// The relay outcome travels in the JSON body, so the HTTP status is 200
/// whenever the event itself was readable.
pub async fn invoke(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    event: Result<Json<ProxyRequest>, JsonRejection>,
) -> Response {
    let Json(event) = match event {
        Ok(event) => event,
        Err(rejection) => return rejection_response(rejection, &request_id),
    };

    let response = state
        .relay
        .handle(&event.raw_body(), state.target_url())
        .await;
    Json(response).into_response()
}

fn render(response: ProxyResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, response.body).into_response()
}
