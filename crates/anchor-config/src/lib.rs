//! Shared configuration for cloud anchor applications.
//!
//! Values are layered by `ortho_config`: built-in defaults, then an optional
//! configuration file (`--config-path` or `ANCHORS_CONFIG_PATH`), then
//! `ANCHORS_*` environment variables, then command-line style arguments
//! supplied by the embedding application. The lifecycle crate only reads the
//! resolved [`Config`]; it never loads configuration itself.

mod defaults;
mod logging;
mod policy;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_MODEL, default_log_filter, default_log_filter_string,
    default_log_format, default_model, default_plane_filter, default_resolved_policy,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use policy::{PlaneFilter, PolicyParseError, ResolvedPolicy};

/// Resolved configuration for an anchor session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "ANCHORS")]
pub struct Config {
    /// `tracing` filter expression, e.g. `info` or `anchor_lifecycle=debug`.
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Output format for the telemetry subscriber.
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
    /// Model asset placed at every hosted or resolved anchor.
    #[ortho_config(default = defaults::default_model())]
    pub model: Utf8PathBuf,
    /// Planes that accept tap-to-host.
    #[ortho_config(default = defaults::default_plane_filter())]
    pub plane_filter: PlaneFilter,
    /// State entered after a successful resolve.
    #[ortho_config(default = defaults::default_resolved_policy())]
    pub resolved_policy: ResolvedPolicy,
    /// Ticks an operation may stay pending before it is abandoned.
    ///
    /// Absent by default: pending operations are polled indefinitely.
    pub pending_tick_limit: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: defaults::default_log_filter_string(),
            log_format: defaults::default_log_format(),
            model: defaults::default_model(),
            plane_filter: defaults::default_plane_filter(),
            resolved_policy: defaults::default_resolved_policy(),
            pending_tick_limit: None,
        }
    }
}

impl Config {
    /// Filter expression handed to the telemetry subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Output format handed to the telemetry subscriber.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Model asset placed at settled anchors.
    #[must_use]
    pub fn model(&self) -> &camino::Utf8Path {
        self.model.as_path()
    }

    /// Planes accepted by tap-to-host.
    #[must_use]
    pub const fn plane_filter(&self) -> PlaneFilter {
        self.plane_filter
    }

    /// State entered after a successful resolve.
    #[must_use]
    pub const fn resolved_policy(&self) -> ResolvedPolicy {
        self.resolved_policy
    }

    /// Optional cap on pending ticks.
    #[must_use]
    pub const fn pending_tick_limit(&self) -> Option<u32> {
        self.pending_tick_limit
    }

    /// Rejects values that load cleanly but cannot drive a controller.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError`] when the model path is empty or the
    /// pending tick limit is zero.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.model.as_str().trim().is_empty() {
            return Err(ConfigValidationError::EmptyModel);
        }
        if self.pending_tick_limit == Some(0) {
            return Err(ConfigValidationError::ZeroPendingTickLimit);
        }
        Ok(())
    }
}

/// Semantic problems found in an otherwise well-formed configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    /// `model` was set to an empty path.
    #[error("model path must not be empty")]
    EmptyModel,
    /// `pending_tick_limit` was set to zero, which would abandon every request.
    #[error("pending_tick_limit must be at least 1 when set")]
    ZeroPendingTickLimit,
}
