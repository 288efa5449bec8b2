//! Error types surfaced by the lifecycle controller.

use thiserror::Error;

use crate::service::CloudServiceError;
use crate::state::OperationPhase;

/// Errors returned by [`crate::AnchorLifecycleController`] and
/// [`crate::SharedController`].
///
/// Requests rejected by lifecycle preconditions are not errors; they surface
/// as [`crate::RequestOutcome::Ignored`].
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The cloud service refused to start the operation.
    #[error("cloud service refused to start {phase}: {source}")]
    Service {
        /// Operation that could not be started.
        phase: OperationPhase,
        /// Underlying error.
        #[source]
        source: CloudServiceError,
    },

    /// A thread panicked while holding the shared controller.
    #[error("anchor controller lock poisoned")]
    LockPoisoned,
}

impl LifecycleError {
    /// Wraps a synchronous service refusal.
    pub(crate) fn service(phase: OperationPhase, source: CloudServiceError) -> Self {
        Self::Service { phase, source }
    }
}
