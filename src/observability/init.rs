//! Tracing subscriber setup.

use super::exporter;
use crate::infrastructure::paths::{self, TRACE_FILE};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name recorded on every exported span.
pub const SERVICE_NAME: &str = "FlagFinder";

/// Installs the global subscriber: an `EnvFilter` built from
/// `config.trace_level` feeding an OpenTelemetry layer that exports to
/// `flagfinder-otlp.json` in the plugin data dir.
///
/// Tracing is optional. If the data dir cannot be created the plugin runs
/// without a subscriber, and calling this again after a subscriber is
/// installed has no effect.
pub fn init_tracing(config: &Config) {
    let data_dir = paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = exporter::create_tracer_provider(data_dir.join(TRACE_FILE), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
