//! Tracing initialization and subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name on every exported span.
pub const SERVICE_NAME: &str = "UserDeck";

/// Trace file name inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "userdeck-otlp.json";

/// Installs the global subscriber: `EnvFilter` from `config.trace_level`,
/// bridged into OpenTelemetry and written to the rotating trace file.
///
/// Traces land in `~/.local/share/zellij/userdeck/userdeck-otlp.json` on the
/// host. Observability is optional: if the data directory cannot be created
/// the plugin runs without a subscriber. Calling this twice is harmless, only
/// the first subscriber is installed.
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);

    let provider =
        exporter::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource, SERVICE_NAME);
    let tracer = provider.tracer(SERVICE_NAME);

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
