//! Tracing initialization and subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "devradar";

/// Installs the global tracing subscriber.
///
/// Sets up a pipeline that:
/// 1. Filters events and spans by `RUST_LOG`, else `config.trace_level`, else `info`
/// 2. Prints events to stderr
/// 3. If `config.trace_file` is set, exports finished spans as OTLP JSON lines
///    to that file (its parent directory is created if missing)
///
/// # Parameters
///
/// * `config` - Configuration carrying `trace_level` and `trace_file`
///
/// # Returns
///
/// `true` if this call installed the subscriber, `false` if one was already
/// installed. Safe to call more than once.
///
/// # Example
///
/// ```rust
/// use devradar::observability::init_tracing;
/// use devradar::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) -> bool {
    let level = config.trace_level.clone().unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let mut setup_error = None;
    let provider = config.trace_file.as_deref().and_then(|path| match ensure_parent(path) {
        Ok(()) => Some(exporter::create_tracer_provider(path.to_path_buf(), resource())),
        Err(e) => {
            setup_error = Some(format!("cannot create trace directory for {}: {e}", path.display()));
            None
        }
    });

    let otel_layer = provider.map(|provider| {
        let tracer = provider.tracer(SERVICE_NAME);
        opentelemetry::global::set_tracer_provider(provider);
        OpenTelemetryLayer::new(tracer)
    });

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .is_ok();

    if let Some(error) = setup_error {
        tracing::warn!(error = %error, "span export disabled");
    }
    if installed {
        tracing::debug!(level = %level, trace_file = ?config.trace_file, "tracing initialized");
    }

    installed
}

fn resource() -> Resource {
    Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ])
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
