use std::time::Duration;

use indexmap::IndexMap;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

/// Environment variable holding the default provider API key
pub const API_KEY_ENV: &str = "Open_Router";

/// Environment variable holding the default model name
pub const MODEL_ENV: &str = "Model_Name";

/// Default OpenAI-compatible API base URL
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Upstream chat-completion provider configuration
///
/// `api_key` and `model` are process-wide defaults. Requests may override
/// them, but an override never writes back here.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Base URL of the OpenAI-compatible API (`/chat/completions` is appended)
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Default API key sent as a bearer token
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Default model identifier
    #[serde(default)]
    pub model: Option<String>,
    /// Outbound request timeout (e.g. "30s", "2m")
    #[serde(default = "default_timeout")]
    pub timeout: String,
    /// Value of the `HTTP-Referer` attribution header
    #[serde(default = "default_referer")]
    pub referer: String,
    /// Value of the `X-Title` attribution header
    #[serde(default = "default_title")]
    pub title: String,
    /// Additional static headers sent with every outbound request
    #[serde(default)]
    pub headers: IndexMap<String, String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            model: None,
            timeout: default_timeout(),
            referer: default_referer(),
            title: default_title(),
            headers: IndexMap::new(),
        }
    }
}

impl ProviderConfig {
    /// Parsed outbound request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if `timeout` is not a valid duration string
    pub fn timeout(&self) -> anyhow::Result<Duration> {
        duration_str::parse(&self.timeout)
            .map_err(|e| anyhow::anyhow!("invalid provider timeout '{}': {e}", self.timeout))
    }

    /// Fill unset defaults from `Open_Router` and `Model_Name`
    ///
    /// Values set in the config file win. Empty strings count as unset.
    pub fn apply_env_defaults(&mut self) {
        if self.api_key.as_ref().is_none_or(|key| key.expose_secret().is_empty()) {
            self.api_key = read_env(API_KEY_ENV).map(SecretString::from);
        }

        if self.model.as_deref().is_none_or(str::is_empty) {
            self.model = read_env(MODEL_ENV);
        }
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("valid default URL")
}

fn default_timeout() -> String {
    "30s".to_string()
}

fn default_referer() -> String {
    "http://localhost:8000".to_string()
}

fn default_title() -> String {
    "Courier".to_string()
}
