pub mod exporters;
pub mod metrics;
pub mod tracing;

use std::collections::HashMap;

use serde::Deserialize;

use self::{exporters::ExporterConfig, metrics::MetricsConfig, tracing::TracingConfig};

/// Telemetry configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Service name for telemetry metadata
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Additional resource attributes
    #[serde(default)]
    pub resource_attributes: HashMap<String, String>,
    /// Default exporter configuration (shared by tracing and metrics)
    #[serde(default)]
    pub exporter: Option<ExporterConfig>,
    /// Tracing-specific configuration
    #[serde(default)]
    pub tracing: Option<TracingConfig>,
    /// Metrics-specific configuration
    #[serde(default)]
    pub metrics: Option<MetricsConfig>,
}

impl TelemetryConfig {
    /// Whether any OTLP exporter is configured
    pub fn has_exporter(&self) -> bool {
        self.exporter.is_some()
            || self.tracing.as_ref().is_some_and(|t| t.exporter.is_some())
            || self.metrics.as_ref().is_some_and(|m| m.exporter.is_some())
    }

    /// Exporter used for traces, falling back to the shared exporter
    pub fn trace_exporter(&self) -> Option<&ExporterConfig> {
        self.tracing
            .as_ref()
            .and_then(|t| t.exporter.as_ref())
            .or(self.exporter.as_ref())
    }

    /// Exporter used for metrics, falling back to the shared exporter
    ///
    /// `None` when metrics are disabled
    pub fn metrics_exporter(&self) -> Option<&ExporterConfig> {
        if self.metrics.as_ref().is_some_and(|m| !m.enabled) {
            return None;
        }

        self.metrics
            .as_ref()
            .and_then(|m| m.exporter.as_ref())
            .or(self.exporter.as_ref())
    }
}

fn default_service_name() -> String {
    "courier".to_string()
}
