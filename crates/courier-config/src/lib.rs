#![allow(clippy::must_use_candidate)]

mod env;
pub mod health;
mod loader;
pub mod provider;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use health::*;
pub use provider::*;
pub use server::*;
pub use telemetry::TelemetryConfig;

/// Top-level Courier configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream chat-completion provider
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
