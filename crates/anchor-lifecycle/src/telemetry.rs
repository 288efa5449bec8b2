//! Structured telemetry initialisation for applications embedding the
//! controller.

use std::io::{self, IsTerminal};

use anchor_config::{Config, LogFormat};
use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Handle returned when telemetry has been initialised.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelemetryHandle;

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Configures the global tracing subscriber when invoked for the first time.
///
/// Repeated calls are idempotent: only the first call installs a subscriber,
/// later calls return a fresh [`TelemetryHandle`].
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter does not parse or another
/// subscriber is already installed globally.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    TELEMETRY_GUARD
        .get_or_try_init(|| install_subscriber(config))
        .map(|_| TelemetryHandle)
}

fn install_subscriber(config: &Config) -> Result<(), TelemetryError> {
    let subscriber = build_subscriber(config)?;
    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)?;

    tracing::info!(
        target: "anchor_lifecycle::telemetry",
        event = "telemetry_initialised",
        format = %config.log_format(),
        model = %config.model(),
        plane_filter = %config.plane_filter(),
        resolved_policy = %config.resolved_policy(),
        pending_tick_limit = ?config.pending_tick_limit(),
        "anchor session telemetry ready"
    );
    Ok(())
}

/// Builds the stderr subscriber described by `config` without installing it.
fn build_subscriber(config: &Config) -> Result<Box<dyn Subscriber + Send + Sync>, TelemetryError> {
    let filter = EnvFilter::try_new(config.log_filter())
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339());

    Ok(match config.log_format() {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    })
}
