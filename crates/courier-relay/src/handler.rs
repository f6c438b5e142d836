//! Axum route for `POST /generate`

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use courier_core::HttpError;
use serde_json::Value;

use crate::error::RelayError;
use crate::relay::Relay;
use crate::types::{GenerateResponse, GenerationRequest};

/// Build the router serving the generation endpoint
pub fn relay_router(relay: Relay) -> Router {
    Router::new()
        .route("/generate", routing::post(generate))
        .with_state(relay)
}

/// Handle `POST /generate`
///
/// The body is taken as raw JSON so that shape errors surface as
/// validation errors naming the field rather than as axum's plain-text
/// rejection.
async fn generate(State(relay): State<Relay>, payload: Result<Json<Value>, JsonRejection>) -> Response {
    let request = match payload {
        Ok(Json(value)) => GenerationRequest::try_from(value),
        Err(rejection) => Err(RelayError::validation("body", rejection.body_text())),
    };

    match request {
        Ok(request) => match relay.generate(request).await {
            Ok(result) => Json(GenerateResponse::from(result)).into_response(),
            Err(e) => error_response(&e),
        },
        Err(e) => {
            tracing::debug!(error = %e, "rejected generation request");
            error_response(&e)
        }
    }
}

fn error_response(error: &RelayError) -> Response {
    (error.status_code(), Json(error.to_body())).into_response()
}
