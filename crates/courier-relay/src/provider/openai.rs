//! OpenAI-compatible provider (OpenRouter by default)

use async_trait::async_trait;
use courier_config::ProviderConfig;
use http::StatusCode;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::Provider;
use crate::error::RelayError;
use crate::protocol::{ChatRequest, ChatResponse, ErrorResponse};

/// Provider speaking the `/chat/completions` protocol
pub struct OpenAiProvider {
    name: String,
    client: Client,
    completions_url: String,
}

impl OpenAiProvider {
    /// Create from provider configuration
    ///
    /// The configured timeout bounds the whole outbound exchange, from
    /// connect to the last body byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout or a configured header is invalid, or
    /// the HTTP client cannot be built
    pub fn new(config: &ProviderConfig) -> anyhow::Result<Self> {
        let timeout = config.timeout()?;

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(default_headers(config)?)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build provider HTTP client: {e}"))?;

        tracing::debug!(base_url = %config.base_url, ?timeout, "initialized provider");

        Ok(Self {
            name: provider_name(&config.base_url),
            client,
            completions_url: completions_url(&config.base_url),
        })
    }
}

/// Attribution headers plus any configured extras
fn default_headers(config: &ProviderConfig) -> anyhow::Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let pairs = [("http-referer", config.referer.as_str()), ("x-title", config.title.as_str())]
        .into_iter()
        .chain(config.headers.iter().map(|(name, value)| (name.as_str(), value.as_str())));

    for (name, value) in pairs {
        let name = HeaderName::try_from(name).map_err(|e| anyhow::anyhow!("invalid header name `{name}`: {e}"))?;
        let value =
            HeaderValue::try_from(value).map_err(|e| anyhow::anyhow!("invalid value for header `{name}`: {e}"))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

fn completions_url(base_url: &Url) -> String {
    let base = base_url.as_str().trim_end_matches('/');
    format!("{base}/chat/completions")
}

fn provider_name(base_url: &Url) -> String {
    base_url.host_str().unwrap_or("provider").to_owned()
}

/// Provider's own diagnosis from an error body
///
/// Prefers `error.message` from an OpenAI-style body, then the raw text,
/// then the status reason.
fn upstream_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        return parsed.error.message;
    }

    let body = body.trim();
    if body.is_empty() {
        status.canonical_reason().unwrap_or("no error message").to_owned()
    } else {
        body.to_owned()
    }
}

/// Status for an error embedded in a 2xx body, taken from its numeric code
fn embedded_error_status(code: Option<&serde_json::Value>) -> StatusCode {
    code.and_then(serde_json::Value::as_u64)
        .and_then(|code| u16::try_from(code).ok())
        .and_then(|code| StatusCode::from_u16(code).ok())
        .filter(|status| !status.is_success())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: &ChatRequest, api_key: &SecretString) -> Result<ChatResponse, RelayError> {
        let response = self
            .client
            .post(&self.completions_url)
            .bearer_auth(api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(provider = %self.name, error = %e, "upstream request failed");
                RelayError::transport(&e)
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(
                        provider = %self.name,
                        status = %status,
                        error = %e,
                        "failed to read upstream error body"
                    );
                    String::new()
                }
            };
            tracing::warn!(
                provider = %self.name,
                status = %status,
                "upstream returned error"
            );
            return Err(RelayError::Upstream {
                status,
                message: upstream_message(status, &body),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::warn!(provider = %self.name, error = %e, "upstream body read failed");
            RelayError::transport(&e)
        })?;

        let parsed: ChatResponse = serde_json::from_slice(&body).map_err(|e| RelayError::Upstream {
            status,
            message: format!("failed to parse provider response: {e}"),
        })?;

        if let Some(error) = parsed.error {
            let status = embedded_error_status(error.code.as_ref());
            tracing::warn!(provider = %self.name, status = %status, "upstream reported error in response body");
            return Err(RelayError::Upstream {
                status,
                message: error.message,
            });
        }

        Ok(parsed)
    }
}
