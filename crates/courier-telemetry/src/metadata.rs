use courier_config::TelemetryConfig;
use opentelemetry::KeyValue;
use opentelemetry_sdk::Resource;
use opentelemetry_semantic_conventions::resource as semconv;

/// Build an OpenTelemetry Resource from configuration
///
/// Configured resource attributes are appended after the service identity,
/// so they cannot replace `service.name` or `service.version`
pub fn build_resource(config: &TelemetryConfig) -> Resource {
    let identity = [
        KeyValue::new(semconv::SERVICE_NAME, config.service_name.clone()),
        KeyValue::new(semconv::SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
    ];

    let extra = config
        .resource_attributes
        .iter()
        .filter(|(key, _)| key.as_str() != semconv::SERVICE_NAME && key.as_str() != semconv::SERVICE_VERSION)
        .map(|(key, value)| KeyValue::new(key.clone(), value.clone()));

    Resource::builder().with_attributes(identity.into_iter().chain(extra)).build()
}
