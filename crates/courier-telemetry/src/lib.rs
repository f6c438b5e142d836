//! Telemetry for Courier
//!
//! Structured logging through `tracing-subscriber`, with optional OTLP
//! export of traces and metrics

mod metadata;
pub mod metrics;

use std::time::Duration;

use courier_config::TelemetryConfig;
use courier_config::telemetry::exporters::{ExportProtocol, ExporterConfig};
use opentelemetry::global;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub use metrics::RelayMetrics;

/// Guard that flushes and shuts down exporters on drop
///
/// Hold it for the lifetime of the process.
pub struct TelemetryGuard {
    meter_provider: Option<SdkMeterProvider>,
    tracer_provider: Option<SdkTracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.meter_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("failed to shutdown meter provider: {e}");
        }
        if let Some(provider) = self.tracer_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("failed to shutdown tracer provider: {e}");
        }
    }
}

/// Initialize logging and, when configured, OTLP export
///
/// `log_filter` is an `EnvFilter` directive such as `info` or
/// `courier_relay=debug,info`; an unparseable directive falls back to `info`.
///
/// # Errors
///
/// Returns an error if an OTLP exporter cannot be built or a global
/// subscriber is already installed
pub fn init(config: Option<&TelemetryConfig>, log_filter: &str) -> anyhow::Result<TelemetryGuard> {
    let filter = EnvFilter::try_new(log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let mut guard = TelemetryGuard {
        meter_provider: None,
        tracer_provider: None,
    };

    let exporting = config.filter(|c| c.has_exporter());
    let resource = exporting.map(metadata::build_resource);

    if let (Some(config), Some(resource)) = (exporting, resource.as_ref())
        && let Some(exporter) = config.metrics_exporter()
    {
        let provider = init_metrics(exporter, resource.clone())?;
        global::set_meter_provider(provider.clone());
        guard.meter_provider = Some(provider);
    }

    let otel_layer = match (exporting, resource) {
        (Some(config), Some(resource)) => match config.trace_exporter() {
            Some(exporter) => {
                let provider = init_tracer(config, exporter, resource)?;
                let tracer = provider.tracer("courier");
                global::set_tracer_provider(provider.clone());
                guard.tracer_provider = Some(provider);
                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            }
            None => None,
        },
        _ => None,
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}

/// Initialize OTLP metrics export
fn init_metrics(exporter_config: &ExporterConfig, resource: Resource) -> anyhow::Result<SdkMeterProvider> {
    use opentelemetry_otlp::MetricExporter;
    use opentelemetry_sdk::metrics::PeriodicReader;

    let exporter = match exporter_config.protocol {
        ExportProtocol::Grpc => MetricExporter::builder()
            .with_tonic()
            .with_endpoint(exporter_config.endpoint.as_str())
            .build(),
        ExportProtocol::HttpProto => MetricExporter::builder()
            .with_http()
            .with_endpoint(exporter_config.endpoint.as_str())
            .build(),
    }
    .map_err(|e| anyhow::anyhow!("failed to build metrics exporter: {e}"))?;

    let reader = PeriodicReader::builder(exporter)
        .with_interval(Duration::from_secs(exporter_config.interval_secs))
        .build();

    Ok(SdkMeterProvider::builder()
        .with_resource(resource)
        .with_reader(reader)
        .build())
}

/// Initialize OTLP trace export
fn init_tracer(
    config: &TelemetryConfig,
    exporter_config: &ExporterConfig,
    resource: Resource,
) -> anyhow::Result<SdkTracerProvider> {
    use opentelemetry_otlp::SpanExporter;
    use opentelemetry_sdk::trace::Sampler;

    let exporter = match exporter_config.protocol {
        ExportProtocol::Grpc => SpanExporter::builder()
            .with_tonic()
            .with_endpoint(exporter_config.endpoint.as_str())
            .build(),
        ExportProtocol::HttpProto => SpanExporter::builder()
            .with_http()
            .with_endpoint(exporter_config.endpoint.as_str())
            .build(),
    }
    .map_err(|e| anyhow::anyhow!("failed to build span exporter: {e}"))?;

    let sampling_rate = config.tracing.as_ref().map_or(1.0, |t| t.sampling_rate);
    let sampler = if sampling_rate >= 1.0 {
        Sampler::AlwaysOn
    } else if sampling_rate <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(sampling_rate)
    };

    let sampler = if config.tracing.as_ref().is_none_or(|t| t.parent_based) {
        Sampler::ParentBased(Box::new(sampler))
    } else {
        sampler
    };

    Ok(SdkTracerProvider::builder()
        .with_resource(resource)
        .with_sampler(sampler)
        .with_batch_exporter(exporter)
        .build())
}
