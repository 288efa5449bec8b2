//! Events surfaced to the presentation layer.

use crate::anchor::{CloudAnchorId, ModelRef};
use crate::service::CloudErrorKind;
use crate::state::OperationPhase;

/// Notification produced by the controller, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A host request was accepted.
    HostingStarted,
    /// Hosting settled successfully.
    AnchorHosted {
        /// Shareable id for the hosted anchor.
        id: CloudAnchorId,
    },
    /// A resolve request was accepted.
    ResolvingStarted,
    /// Resolving settled successfully.
    AnchorResolved,
    /// The cloud service reported a failure.
    AnchorError {
        /// Failure reported by the service.
        kind: CloudErrorKind,
        /// Operation that failed.
        phase: OperationPhase,
    },
    /// The operation stayed pending past the configured limit.
    AnchorTimedOut {
        /// Operation that was abandoned.
        phase: OperationPhase,
        /// Pending ticks observed before giving up.
        ticks: u32,
    },
    /// The model is attached to the settled anchor.
    ModelPlaced {
        /// Model that was placed.
        model: ModelRef,
    },
    /// The model could not be placed. The anchor itself is unaffected.
    PlacementFailed {
        /// Model that failed to load or attach.
        model: ModelRef,
        /// Reason given by the placement collaborator.
        reason: String,
    },
}

impl LifecycleEvent {
    /// Short stable label used in structured logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HostingStarted => "hosting_started",
            Self::AnchorHosted { .. } => "anchor_hosted",
            Self::ResolvingStarted => "resolving_started",
            Self::AnchorResolved => "anchor_resolved",
            Self::AnchorError { .. } => "anchor_error",
            Self::AnchorTimedOut { .. } => "anchor_timed_out",
            Self::ModelPlaced { .. } => "model_placed",
            Self::PlacementFailed { .. } => "placement_failed",
        }
    }
}
