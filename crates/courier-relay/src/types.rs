//! Inbound request validation and relay result types

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RelayError;

/// Validated generation request
///
/// Overrides apply to this request only.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Prompt text; never empty
    pub text: String,
    /// Image reference, forwarded verbatim
    pub image_url: Option<String>,
    /// Credential override
    pub api_key: Option<SecretString>,
    /// Model override
    pub model_name: Option<String>,
}

impl GenerationRequest {
    /// Request carrying only prompt text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image_url: None,
            api_key: None,
            model_name: None,
        }
    }
}

impl TryFrom<Value> for GenerationRequest {
    type Error = RelayError;

    /// Validate a raw `/generate` payload
    ///
    /// `text` must be a non-empty string. `image_url`, `api_key` and
    /// `model_name` must be strings when present; `null` and `""` count as
    /// absent. Unknown fields are ignored.
    fn try_from(payload: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut object) = payload else {
            return Err(RelayError::validation("body", "request body must be a JSON object"));
        };

        let text = match object.remove("text") {
            Some(Value::String(text)) if !text.is_empty() => text,
            Some(Value::String(_)) => {
                return Err(RelayError::validation("text", "field `text` must not be empty"));
            }
            None | Some(Value::Null) => {
                return Err(RelayError::validation("text", "field `text` is required"));
            }
            Some(_) => {
                return Err(RelayError::validation("text", "field `text` must be a string"));
            }
        };

        Ok(Self {
            text,
            image_url: optional_string(&mut object, "image_url")?,
            api_key: optional_string(&mut object, "api_key")?.map(SecretString::from),
            model_name: optional_string(&mut object, "model_name")?,
        })
    }
}

fn optional_string(object: &mut Map<String, Value>, field: &'static str) -> Result<Option<String>, RelayError> {
    match object.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value).filter(|v| !v.is_empty())),
        Some(_) => Err(RelayError::validation(field, format!("field `{field}` must be a string"))),
    }
}

/// Outcome of a successful relay
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Generated text
    pub response: String,
    /// Model the provider reports having used
    pub model: String,
}

/// `/generate` success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}

impl From<GenerationResult> for GenerateResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            response: result.response,
        }
    }
}
