//! Provider trait and the OpenAI-compatible backend

pub mod openai;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::RelayError;
use crate::protocol::{ChatRequest, ChatResponse};

/// Trait implemented by each chat-completion backend
///
/// One call to `complete` is one outbound attempt; implementations must not
/// retry.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Send a chat completion request authenticated with `api_key`
    async fn complete(&self, request: &ChatRequest, api_key: &SecretString) -> Result<ChatResponse, RelayError>;
}
