//! Boundary to the collaborator that instantiates models at anchors.

use std::fmt;

use thiserror::Error;

use crate::anchor::{CloudAnchorHandle, ModelRef};

/// Ticket identifying one placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacementTicket(u64);

impl PlacementTicket {
    /// Wraps a collaborator-assigned ticket identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Collaborator-assigned identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Progress of a placement request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementStatus {
    /// The model is still loading.
    Loading,
    /// The model is attached to the anchor.
    Placed,
    /// The model could not be loaded or attached.
    Failed(String),
}

/// Synchronous refusal to start a placement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PlacementError {
    message: String,
}

impl PlacementError {
    /// Builds a placement error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Human-friendly description.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Behaviour required from the scene-side placement collaborator.
///
/// Failures here never influence the anchor lifecycle.
pub trait Placement: Send {
    /// Starts loading `model` and attaching it to `anchor`.
    fn place(
        &mut self,
        anchor: &CloudAnchorHandle,
        model: &ModelRef,
    ) -> Result<PlacementTicket, PlacementError>;

    /// Reads the progress of a placement.
    fn poll(&mut self, ticket: PlacementTicket) -> PlacementStatus;

    /// Removes placed (or still loading) content from the scene.
    fn remove(&mut self, ticket: PlacementTicket);
}

impl fmt::Debug for dyn Placement {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Placement")
    }
}
