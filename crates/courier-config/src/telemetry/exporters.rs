use serde::Deserialize;
use url::Url;

/// OTLP exporter configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    /// OTLP endpoint URL
    pub endpoint: Url,
    /// Export protocol
    #[serde(default)]
    pub protocol: ExportProtocol,
    /// Export interval in seconds
    #[serde(default = "default_export_interval")]
    pub interval_secs: u64,
}

/// OTLP export protocol
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportProtocol {
    /// gRPC (default)
    #[default]
    Grpc,
    /// HTTP/protobuf
    HttpProto,
}

#[allow(clippy::missing_const_for_fn)]
fn default_export_interval() -> u64 {
    30
}
