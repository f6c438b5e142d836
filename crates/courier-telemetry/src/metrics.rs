//! Metric names and recorders for relay traffic

use std::time::Instant;

use opentelemetry::KeyValue;
use opentelemetry::metrics::{Counter, Histogram};

/// Completed `/generate` requests, tagged by outcome
pub const RELAY_REQUEST_COUNT: &str = "courier.relay.request.count";

/// Wall-clock duration of `/generate` requests in seconds, tagged by outcome
pub const RELAY_REQUEST_DURATION: &str = "courier.relay.request.duration";

/// Attribute key carrying the request outcome (`success`, `upstream_error`, ...)
pub const OUTCOME: &str = "outcome";

/// Record a duration measurement on a histogram
pub fn record_duration(histogram: &Histogram<f64>, start: Instant, attributes: &[KeyValue]) {
    histogram.record(start.elapsed().as_secs_f64(), attributes);
}

/// Instruments for relay requests
///
/// Built from the global meter, so it records into whatever provider
/// `crate::init` installed (or a no-op provider when export is off)
#[derive(Clone)]
pub struct RelayMetrics {
    requests: Counter<u64>,
    duration: Histogram<f64>,
}

impl RelayMetrics {
    pub fn new() -> Self {
        let meter = opentelemetry::global::meter("courier");

        Self {
            requests: meter
                .u64_counter(RELAY_REQUEST_COUNT)
                .with_description("Completed generation requests")
                .build(),
            duration: meter
                .f64_histogram(RELAY_REQUEST_DURATION)
                .with_unit("s")
                .with_description("Generation request duration")
                .build(),
        }
    }

    /// Record one finished request
    pub fn record(&self, outcome: &'static str, start: Instant) {
        let attributes = [KeyValue::new(OUTCOME, outcome)];
        self.requests.add(1, &attributes);
        record_duration(&self.duration, start, &attributes);
    }
}

impl Default for RelayMetrics {
    fn default() -> Self {
        Self::new()
    }
}
