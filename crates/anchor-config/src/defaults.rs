//! Built-in defaults applied when no configuration layer supplies a value.

use camino::Utf8PathBuf;

use crate::logging::LogFormat;
use crate::policy::{PlaneFilter, ResolvedPolicy};

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Model asset placed at hosted and resolved anchors.
pub const DEFAULT_MODEL: &str = "dog.sfb";

/// Default log filter expression.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Default model asset path.
#[must_use]
pub fn default_model() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_MODEL)
}

/// Only upward-facing horizontal planes accept taps unless configured otherwise.
#[must_use]
pub const fn default_plane_filter() -> PlaneFilter {
    PlaneFilter::HorizontalUpward
}

/// Resolved anchors stay resolved until cleared unless configured otherwise.
#[must_use]
pub const fn default_resolved_policy() -> ResolvedPolicy {
    ResolvedPolicy::Sticky
}
