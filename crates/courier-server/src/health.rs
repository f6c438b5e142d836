use axum::Json;
use serde::Serialize;

/// Liveness body; independent of provider reachability
#[derive(Debug, Serialize)]
pub struct Heartbeat {
    status: &'static str,
    message: &'static str,
}

/// Health check handler
pub async fn heartbeat_handler() -> Json<Heartbeat> {
    Json(Heartbeat {
        status: "healthy",
        message: "API is running",
    })
}
