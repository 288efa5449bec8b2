//! Lock-guarded controller for hosts that call in from several threads.
//!
//! UI callbacks and the render loop may run on different threads. Each
//! operation here holds the lock for its whole check-then-transition
//! sequence, so a tick can never interleave with the idle check of a request.

use std::sync::{Arc, Mutex};

use crate::anchor::LocalAnchor;
use crate::controller::{AnchorLifecycleController, RequestOutcome, TickOutcome};
use crate::errors::LifecycleError;
use crate::events::LifecycleEvent;
use crate::input::{DispatchOutcome, PresentationInput};
use crate::state::LifecycleState;

/// Cloneable handle to a controller shared across threads.
#[derive(Clone, Debug)]
pub struct SharedController {
    inner: Arc<Mutex<AnchorLifecycleController>>,
}

impl SharedController {
    /// Wraps a controller for shared use.
    #[must_use]
    pub fn new(controller: AnchorLifecycleController) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    /// Executes a closure with exclusive access to the controller.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::LockPoisoned`] if a previous holder panicked.
    pub fn with_controller<F, R>(&self, f: F) -> Result<R, LifecycleError>
    where
        F: FnOnce(&mut AnchorLifecycleController) -> R,
    {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| LifecycleError::LockPoisoned)?;
        Ok(f(&mut guard))
    }

    /// See [`AnchorLifecycleController::request_host`].
    ///
    /// # Errors
    ///
    /// Propagates lock poisoning and service refusals.
    pub fn request_host(&self, anchor: LocalAnchor) -> Result<RequestOutcome, LifecycleError> {
        self.with_controller(|controller| controller.request_host(anchor))?
    }

    /// See [`AnchorLifecycleController::request_resolve`].
    ///
    /// # Errors
    ///
    /// Propagates lock poisoning and service refusals.
    pub fn request_resolve(&self, id: &str) -> Result<RequestOutcome, LifecycleError> {
        self.with_controller(|controller| controller.request_resolve(id))?
    }

    /// See [`AnchorLifecycleController::clear`].
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::LockPoisoned`] if a previous holder panicked.
    pub fn clear(&self) -> Result<(), LifecycleError> {
        self.with_controller(AnchorLifecycleController::clear)
    }

    /// See [`AnchorLifecycleController::on_tick`].
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::LockPoisoned`] if a previous holder panicked.
    pub fn on_tick(&self) -> Result<TickOutcome, LifecycleError> {
        self.with_controller(AnchorLifecycleController::on_tick)
    }

    /// See [`AnchorLifecycleController::dispatch`].
    ///
    /// # Errors
    ///
    /// Propagates lock poisoning and service refusals.
    pub fn dispatch(&self, input: PresentationInput) -> Result<DispatchOutcome, LifecycleError> {
        self.with_controller(|controller| controller.dispatch(input))?
    }

    /// Current lifecycle state.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::LockPoisoned`] if a previous holder panicked.
    pub fn state(&self) -> Result<LifecycleState, LifecycleError> {
        self.with_controller(|controller| controller.state())
    }

    /// Drains pending events.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::LockPoisoned`] if a previous holder panicked.
    pub fn take_events(&self) -> Result<Vec<LifecycleEvent>, LifecycleError> {
        self.with_controller(AnchorLifecycleController::take_events)
    }
}
