//! Logging for rampart
//!
//! Installs a `tracing` subscriber writing to stderr, so rendered documents
//! on stdout stay machine-readable.

use rampart_config::TelemetryConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the configured filter. Output is text
/// unless `json` is set.
///
/// # Errors
///
/// Returns an error if the filter directives are invalid or a global
/// subscriber is already installed
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = build_filter(config)?;

    let json_layer = config.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
    });

    let text_layer = (!config.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    tracing::debug!(json = config.json, "logging initialized");

    Ok(())
}

fn build_filter(config: &TelemetryConfig) -> anyhow::Result<EnvFilter> {
    if let Ok(directives) = std::env::var(EnvFilter::DEFAULT_ENV)
        && !directives.trim().is_empty()
    {
        return EnvFilter::try_new(&directives).map_err(|e| anyhow::anyhow!("invalid RUST_LOG directives: {e}"));
    }

    EnvFilter::try_new(&config.filter)
        .map_err(|e| anyhow::anyhow!("invalid telemetry.filter `{}`: {e}", config.filter))
}
