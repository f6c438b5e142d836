use http::StatusCode;
use serde::Serialize;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each feature crate's error type. The route layer
/// converts these into actual HTTP responses, keeping domain errors
/// decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `validation_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;

    /// Extra fields merged into the JSON error body
    fn details(&self) -> serde_json::Map<String, serde_json::Value> {
        serde_json::Map::new()
    }

    /// Assemble the JSON error body for this error
    fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.client_message(),
            error_type: self.error_type().to_owned(),
            details: self.details(),
        }
    }
}

/// Flat JSON error body returned to API consumers
///
/// Serializes as `{"error": "...", "type": "...", ...details}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Human-readable description
    pub error: String,
    /// Machine-readable error kind
    #[serde(rename = "type")]
    pub error_type: String,
    /// Kind-specific fields
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}
