//! Cloud anchor lifecycle coordination.
#![deny(missing_docs)]
//!
//! The crate owns a single anchor slot and drives one host or resolve
//! operation at a time against a polling cloud anchor service. Requests only
//! start work; every frame tick polls the in-flight operation once, settles it
//! when the service reports success or failure, and queues at most one
//! [`LifecycleEvent`] for the presentation layer. The service and the
//! scene-side model placement sit behind the [`CloudAnchorService`] and
//! [`Placement`] traits so tests and platform bindings can inject their own
//! implementations.

mod anchor;
mod controller;
mod errors;
mod events;
mod input;
mod placement;
mod service;
mod settings;
mod shared;
mod slot;
mod state;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use anchor::{CloudAnchorHandle, CloudAnchorId, LocalAnchor, ModelRef};
pub use controller::{AnchorLifecycleController, IgnoreReason, RequestOutcome, TickOutcome};
pub use errors::LifecycleError;
pub use events::LifecycleEvent;
pub use input::{DispatchOutcome, PlaneOrientation, PresentationInput};
pub use placement::{Placement, PlacementError, PlacementStatus, PlacementTicket};
pub use service::{CloudAnchorService, CloudAnchorStatus, CloudErrorKind, CloudServiceError};
pub use settings::ControllerSettings;
pub use shared::SharedController;
pub use slot::{AnchorOrigin, AnchorSlot};
pub use state::{LifecycleState, OperationPhase};
