//! Controller settings projected from the shared configuration.

use std::num::NonZeroU32;

use anchor_config::{Config, ConfigValidationError, PlaneFilter, ResolvedPolicy};

use crate::anchor::ModelRef;

/// Knobs that shape controller behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    model: ModelRef,
    plane_filter: PlaneFilter,
    resolved_policy: ResolvedPolicy,
    pending_tick_limit: Option<NonZeroU32>,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            model: ModelRef::new(anchor_config::default_model()),
            plane_filter: anchor_config::default_plane_filter(),
            resolved_policy: anchor_config::default_resolved_policy(),
            pending_tick_limit: None,
        }
    }
}

impl ControllerSettings {
    /// Builds settings from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns the configuration's validation error when it cannot drive a
    /// controller.
    pub fn from_config(config: &Config) -> Result<Self, ConfigValidationError> {
        config.validate()?;
        Ok(Self {
            model: ModelRef::new(config.model().to_path_buf()),
            plane_filter: config.plane_filter(),
            resolved_policy: config.resolved_policy(),
            pending_tick_limit: config.pending_tick_limit().and_then(NonZeroU32::new),
        })
    }

    /// Replaces the model placed at settled anchors.
    #[must_use]
    pub fn with_model(mut self, model: ModelRef) -> Self {
        self.model = model;
        self
    }

    /// Replaces the tap plane filter.
    #[must_use]
    pub fn with_plane_filter(mut self, filter: PlaneFilter) -> Self {
        self.plane_filter = filter;
        self
    }

    /// Replaces the post-resolve policy.
    #[must_use]
    pub fn with_resolved_policy(mut self, policy: ResolvedPolicy) -> Self {
        self.resolved_policy = policy;
        self
    }

    /// Caps how many ticks an operation may stay pending.
    #[must_use]
    pub fn with_pending_tick_limit(mut self, limit: Option<NonZeroU32>) -> Self {
        self.pending_tick_limit = limit;
        self
    }

    /// Model placed at settled anchors.
    #[must_use]
    pub const fn model(&self) -> &ModelRef {
        &self.model
    }

    /// Planes that accept tap-to-host.
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
    pub const fn pending_tick_limit(&self) -> Option<NonZeroU32> {
        self.pending_tick_limit
    }
}
