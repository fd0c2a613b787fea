//! Subscriber setup: level filter, plain-text log file and OpenTelemetry span file.

use super::file_writer::FileWriter;
use super::tracer::{self, SCOPE_NAME};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Human-readable log, one event per line.
pub const LOG_FILE: &str = "shopdash.log";

/// OTLP JSON, one exported batch per line.
pub const SPAN_FILE: &str = "shopdash-spans.json";

/// Installs the global subscriber for the plugin or worker.
///
/// Both files live in [`Config::data_dir`]. The level comes from
/// `trace_level` and defaults to `info`; an unparsable level falls back to the
/// default as well. Calling this more than once is harmless because only the
/// first subscriber is installed. If the data directory cannot be created,
/// nothing is installed and the plugin runs without logs.
///
/// ```rust
/// use shopdash::observability::init_tracing;
/// use shopdash::Config;
///
/// let dir = std::env::temp_dir().join("shopdash-doc-tracing");
/// let config = Config {
///     data_dir: dir,
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    if std::fs::create_dir_all(&config.data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SCOPE_NAME)]);
    let provider = tracer::create_tracer_provider(config.data_dir.join(SPAN_FILE), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME));

    let log_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(FileWriter::new(config.data_dir.join(LOG_FILE)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(log_layer)
        .with(otel_layer)
        .try_init();
}
