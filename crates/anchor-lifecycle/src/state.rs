//! Lifecycle states and operation phases.

use std::fmt;

/// Coarse state of the single anchor slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Nothing in flight; host and resolve requests are accepted.
    #[default]
    Idle,
    /// Waiting for a host operation to settle.
    Hosting,
    /// Waiting for a resolve operation to settle.
    Resolving,
    /// A resolve succeeded and the anchor is being tracked.
    Resolved,
}

impl LifecycleState {
    /// Whether new host or resolve requests are accepted.
    #[must_use]
    pub const fn accepts_requests(self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Hosting => "hosting",
            Self::Resolving => "resolving",
            Self::Resolved => "resolved",
        };
        formatter.write_str(label)
    }
}

/// Kind of cloud operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationPhase {
    /// Uploading a local anchor.
    Hosting,
    /// Locating a hosted anchor by id.
    Resolving,
}

impl OperationPhase {
    /// State entered while this phase is in flight.
    #[must_use]
    pub const fn in_flight_state(self) -> LifecycleState {
        match self {
            Self::Hosting => LifecycleState::Hosting,
            Self::Resolving => LifecycleState::Resolving,
        }
    }
}

impl fmt::Display for OperationPhase {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Hosting => "hosting",
            Self::Resolving => "resolving",
        };
        formatter.write_str(label)
    }
}
