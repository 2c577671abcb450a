//! Tracing subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber.
///
/// - `EnvFilter` from `config.trace_level` (default `"info"`; an invalid
///   directive also falls back to `"info"`)
/// - a `fmt` layer on stderr
/// - when `config.trace_file` is set, an OpenTelemetry layer exporting OTLP
///   JSON lines to that file
///
/// Only the first call takes effect. Never fails: if the trace file's
/// directory cannot be created the file layer is skipped and a warning is
/// logged once the subscriber is up.
///
/// # Example
///
/// ```rust
/// use labsite::observability::init_tracing;
/// use labsite::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let mut skipped = None;
    let otel_layer = config.trace_file.as_ref().and_then(|file| {
        let path = PathBuf::from(file);
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(dir) {
                skipped = Some(format!("{}: {e}", dir.display()));
                return None;
            }
        }

        let resource = Resource::new(vec![
            KeyValue::new("service.name", "labsite"),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ]);
        let provider = exporter::tracer_provider(path, resource);
        Some(tracing_opentelemetry::layer().with_tracer(provider.tracer(exporter::SCOPE)))
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .is_ok();

    if let Some(reason) = skipped {
        tracing::warn!(reason = %reason, "trace file disabled");
    }
    if installed {
        tracing::debug!(level, trace_file = ?config.trace_file, "tracing initialized");
    }
}
