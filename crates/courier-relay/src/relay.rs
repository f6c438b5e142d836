//! Request resolution and the single outbound attempt per request

use std::sync::Arc;
use std::time::Instant;

use courier_config::ProviderConfig;
use courier_telemetry::RelayMetrics;
use http::StatusCode;
use secrecy::SecretString;
use tracing::Instrument;

use crate::error::RelayError;
use crate::protocol::{ChatMessage, ChatRequest, ChatResponse, ContentPart};
use crate::provider::Provider;
use crate::provider::openai::OpenAiProvider;
use crate::types::{GenerationRequest, GenerationResult};

/// Shared relay state, cheap to clone into route handlers
///
/// Defaults are fixed at construction. Per-request overrides are resolved
/// into locals and never touch them, so concurrent requests cannot observe
/// each other's credentials or model.
#[derive(Clone)]
pub struct Relay {
    inner: Arc<RelayInner>,
}

struct RelayInner {
    provider: Arc<dyn Provider>,
    defaults: Defaults,
    metrics: RelayMetrics,
}

/// Process-wide fallbacks for requests that carry no override
#[derive(Debug, Clone, Default)]
pub struct Defaults {
    pub api_key: Option<SecretString>,
    pub model: Option<String>,
}

impl Relay {
    pub fn new(provider: Arc<dyn Provider>, defaults: Defaults) -> Self {
        Self {
            inner: Arc::new(RelayInner {
                provider,
                defaults,
                metrics: RelayMetrics::new(),
            }),
        }
    }

    /// Build a relay backed by the OpenAI-compatible provider
    ///
    /// # Errors
    ///
    /// Returns an error if the provider client cannot be built
    pub fn from_config(config: &ProviderConfig) -> anyhow::Result<Self> {
        let provider = OpenAiProvider::new(config)?;

        tracing::info!(
            provider = provider.name(),
            api_key_configured = config.api_key.is_some(),
            model = config.model.as_deref().unwrap_or("<unset>"),
            "resolved provider defaults"
        );

        if config.api_key.is_none() {
            tracing::warn!("no default API key configured; requests must supply `api_key`");
        }
        if config.model.is_none() {
            tracing::warn!("no default model configured; requests must supply `model_name`");
        }

        Ok(Self::new(
            Arc::new(provider),
            Defaults {
                api_key: config.api_key.clone(),
                model: config.model.clone(),
            },
        ))
    }

    /// Relay one validated request to the provider
    ///
    /// Makes at most one outbound call and none at all when no credential
    /// or model can be resolved.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Configuration`] when neither the request nor the
    /// defaults supply a key or model, otherwise whatever the provider call
    /// produced
    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationResult, RelayError> {
        let start = Instant::now();
        let span = tracing::info_span!(
            "generate",
            provider = self.inner.provider.name(),
            model = tracing::field::Empty,
            has_image = request.image_url.is_some(),
        );

        let result = self.relay(request).instrument(span.clone()).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        self.inner.metrics.record(outcome, start);

        span.in_scope(|| match &result {
            Ok(generated) => tracing::info!(model = %generated.model, "generation completed"),
            Err(e) => tracing::warn!(error = %e, outcome, "generation failed"),
        });

        result
    }

    async fn relay(&self, request: GenerationRequest) -> Result<GenerationResult, RelayError> {
        let GenerationRequest {
            text,
            image_url,
            api_key,
            model_name,
        } = request;

        let api_key = api_key
            .or_else(|| self.inner.defaults.api_key.clone())
            .ok_or_else(|| RelayError::Configuration("API key is required".to_owned()))?;
        let model = model_name
            .or_else(|| self.inner.defaults.model.clone())
            .ok_or_else(|| RelayError::Configuration("Model name is required".to_owned()))?;

        tracing::Span::current().record("model", model.as_str());

        let mut content = vec![ContentPart::text(text)];
        if let Some(url) = image_url {
            content.push(ContentPart::image(url));
        }

        let chat = ChatRequest {
            model,
            messages: vec![ChatMessage::user(content)],
        };

        let response = self.inner.provider.complete(&chat, &api_key).await?;
        extract_result(response, chat.model)
    }
}

/// Pull the first choice's text out of a provider response
fn extract_result(response: ChatResponse, requested_model: String) -> Result<GenerationResult, RelayError> {
    let model = response.model.unwrap_or(requested_model);

    let choice = response.choices.into_iter().next().ok_or_else(|| RelayError::Upstream {
        status: StatusCode::OK,
        message: "provider returned no choices".to_owned(),
    })?;

    let text = choice.message.content.ok_or_else(|| RelayError::Upstream {
        status: StatusCode::OK,
        message: "provider returned a choice without content".to_owned(),
    })?;

    Ok(GenerationResult { response: text, model })
}
