//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use courier_config::{Config, HealthConfig, ProviderConfig, ServerConfig};
use secrecy::SecretString;

/// Builder for constructing test configurations
///
/// Starts with no default key or model, mirroring a process started without
/// `Open_Router` and `Model_Name`.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                provider: ProviderConfig {
                    timeout: "5s".to_owned(),
                    ..ProviderConfig::default()
                },
                telemetry: None,
            },
        }
    }

    /// Point the provider at a mock backend
    pub fn with_provider(mut self, base_url: &str) -> Self {
        self.config.provider.base_url = base_url.parse().expect("valid URL");
        self
    }

    /// Set the default API key and model used when a request has no overrides
    pub fn with_defaults(mut self, api_key: &str, model: &str) -> Self {
        self.config.provider.api_key = Some(SecretString::from(api_key));
        self.config.provider.model = Some(model.to_owned());
        self
    }

    /// Set the outbound timeout
    pub fn with_timeout(mut self, timeout: &str) -> Self {
        self.config.provider.timeout = timeout.to_owned();
        self
    }

    /// Serve the liveness endpoint at a different path
    pub fn with_health_path(mut self, path: &str) -> Self {
        self.config.server.health.path = path.to_owned();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
