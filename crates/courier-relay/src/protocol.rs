//! OpenAI-compatible chat completion wire format

use serde::{Deserialize, Serialize};

// -- Request types --

/// Chat completion request sent to the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages; always a single user turn here
    pub messages: Vec<ChatMessage>,
}

/// Message within a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role
    pub role: String,
    /// Ordered content parts
    pub content: Vec<ContentPart>,
}

impl ChatMessage {
    /// User message with the given parts
    pub fn user(content: Vec<ContentPart>) -> Self {
        Self {
            role: "user".to_owned(),
            content,
        }
    }
}

/// Individual content part in a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text content
    Text {
        /// The text string
        text: String,
    },
    /// Image content via URL
    ImageUrl {
        /// Image URL reference
        image_url: ImageUrl,
    },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }
}

/// Image URL reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// Image URL or base64 data URI
    pub url: String,
}

// -- Response types --

/// Chat completion response
///
/// Only the fields the relay reads are required; OpenRouter and other
/// compatible APIs vary in what else they include. Some providers report
/// failures in a 2xx body via `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Response identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Model that actually served the request
    #[serde(default)]
    pub model: Option<String>,
    /// Generated choices
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Token usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// Error reported inside a successful HTTP response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

/// Choice within a response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    /// Generated message
    pub message: ChoiceMessage,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message within a response choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceMessage {
    /// Role (always "assistant")
    #[serde(default)]
    pub role: Option<String>,
    /// Text content
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage
///
/// Informational only; providers omit counts or send `null` for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    /// Prompt tokens
    #[serde(default)]
    pub prompt_tokens: Option<u32>,
    /// Completion tokens
    #[serde(default)]
    pub completion_tokens: Option<u32>,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: Option<u32>,
}

// -- Error response --

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Error message
    pub message: String,
    /// Error code; numeric on OpenRouter, a string on `OpenAI`
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_part_serializes_in_openai_shape() {
        let message = ChatMessage::user(vec![
            ContentPart::text("What is in this image?"),
            ContentPart::image("https://example.com/cat.png"),
        ]);

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            serde_json::json!({
                "role": "user",
                "content": [
                    {"type": "text", "text": "What is in this image?"},
                    {"type": "image_url", "image_url": {"url": "https://example.com/cat.png"}},
                ]
            })
        );
    }

    #[test]
    fn sparse_openrouter_response_parses() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"content": "hi"}}]
        }))
        .unwrap();

        assert_eq!(response.choices[0].message.content.as_deref(), Some("hi"));
        assert!(response.error.is_none());
    }

    #[test]
    fn partial_usage_parses() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"content": "hi"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": null}
        }))
        .unwrap();

        let usage = response.usage.unwrap();
        assert_eq!(usage.prompt_tokens, Some(10));
        assert_eq!(usage.completion_tokens, None);
        assert_eq!(usage.total_tokens, None);
    }

    #[test]
    fn numeric_error_code_parses() {
        let response: ErrorResponse = serde_json::from_value(serde_json::json!({
            "error": {"message": "No auth credentials found", "code": 401}
        }))
        .unwrap();

        assert_eq!(response.error.message, "No auth credentials found");
        assert_eq!(response.error.code, Some(serde_json::json!(401)));
    }
}
