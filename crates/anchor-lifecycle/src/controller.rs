//! The anchor lifecycle state machine.

use std::mem;

use anchor_config::ResolvedPolicy;

use crate::anchor::{CloudAnchorId, LocalAnchor};
use crate::errors::LifecycleError;
use crate::events::LifecycleEvent;
use crate::input::PlaneOrientation;
use crate::placement::{Placement, PlacementStatus};
use crate::service::{CloudAnchorService, CloudAnchorStatus, CloudServiceError};
use crate::settings::ControllerSettings;
use crate::slot::{AnchorOrigin, AnchorSlot, HeldAnchor, PlacementProgress};
use crate::state::{LifecycleState, OperationPhase};

/// Result of a host or resolve request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The operation started and is now polled on every tick.
    Started(OperationPhase),
    /// The request was a no-op.
    Ignored(IgnoreReason),
}

/// Why a request was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The controller was not idle.
    Busy(LifecycleState),
    /// The resolve id was empty after trimming.
    EmptyId,
    /// The tapped plane is excluded by the plane filter.
    UnsupportedPlane(PlaneOrientation),
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No operation in flight.
    Inactive,
    /// The operation is still pending.
    Pending,
    /// The operation settled and the controller entered this state.
    Settled(LifecycleState),
    /// The operation exceeded the pending tick limit.
    TimedOut,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    phase: OperationPhase,
    pending_ticks: u32,
}

/// Coordinates one host or resolve operation at a time over a single slot.
///
/// All progress happens in [`AnchorLifecycleController::on_tick`]; requests
/// only start work. Events accumulate until drained with
/// [`AnchorLifecycleController::take_events`].
#[derive(Debug)]
pub struct AnchorLifecycleController {
    service: Box<dyn CloudAnchorService>,
    placement: Option<Box<dyn Placement>>,
    settings: ControllerSettings,
    state: LifecycleState,
    in_flight: Option<InFlight>,
    slot: AnchorSlot,
    events: Vec<LifecycleEvent>,
}

impl AnchorLifecycleController {
    /// Builds an idle controller over the supplied service.
    #[must_use]
    pub fn new(service: Box<dyn CloudAnchorService>, settings: ControllerSettings) -> Self {
        Self {
            service,
            placement: None,
            settings,
            state: LifecycleState::Idle,
            in_flight: None,
            slot: AnchorSlot::default(),
            events: Vec::new(),
        }
    }

    /// Attaches the collaborator that places models at settled anchors.
    #[must_use]
    pub fn with_placement(mut self, placement: Box<dyn Placement>) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    /// Read-only view of the anchor slot.
    #[must_use]
    pub const fn slot(&self) -> &AnchorSlot {
        &self.slot
    }

    /// Cloud id recorded by the last successful host.
    #[must_use]
    pub const fn cloud_id(&self) -> Option<&CloudAnchorId> {
        self.slot.cloud_id()
    }

    /// Active settings.
    #[must_use]
    pub const fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Events emitted since the last drain.
    #[must_use]
    pub fn events(&self) -> &[LifecycleEvent] {
        &self.events
    }

    /// Drains pending events in emission order.
    pub fn take_events(&mut self) -> Vec<LifecycleEvent> {
        mem::take(&mut self.events)
    }

    /// Releases the slot anchor and starts hosting `anchor`.
    ///
    /// A no-op unless the controller is idle.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Service`] when the service refuses to start.
    pub fn request_host(&mut self, anchor: LocalAnchor) -> Result<RequestOutcome, LifecycleError> {
        let phase = OperationPhase::Hosting;
        if let Some(reason) = self.busy() {
            return Ok(self.ignore(phase, reason));
        }

        self.begin(phase, |service| {
            let handle = service.host(anchor)?;
            Ok(HeldAnchor::new(handle, AnchorOrigin::Local(anchor)))
        })
    }

    /// Releases the slot anchor and starts resolving `id`.
    ///
    /// A no-op when `id` is blank or the controller is not idle.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Service`] when the service refuses to start.
    pub fn request_resolve(&mut self, id: &str) -> Result<RequestOutcome, LifecycleError> {
        let phase = OperationPhase::Resolving;
        let Some(cloud_id) = CloudAnchorId::parse(id) else {
            return Ok(self.ignore(phase, IgnoreReason::EmptyId));
        };
        if let Some(reason) = self.busy() {
            return Ok(self.ignore(phase, reason));
        }

        self.begin(phase, |service| {
            let handle = service.resolve(&cloud_id)?;
            Ok(HeldAnchor::new(handle, AnchorOrigin::Cloud(cloud_id)))
        })
    }

    /// Tap-to-host entry point that applies the plane filter first.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Service`] when the service refuses to start.
    pub fn on_tap_to_host(
        &mut self,
        anchor: LocalAnchor,
        plane: PlaneOrientation,
    ) -> Result<RequestOutcome, LifecycleError> {
        if !plane.admitted_by(self.settings.plane_filter()) {
            return Ok(self.ignore(
                OperationPhase::Hosting,
                IgnoreReason::UnsupportedPlane(plane),
            ));
        }
        self.request_host(anchor)
    }

    /// Releases the slot anchor, forgets the cloud id and returns to idle.
    ///
    /// The service call behind an in-flight operation keeps running; its
    /// eventual settlement is never observed.
    pub fn clear(&mut self) {
        let released = self
            .slot
            .clear(self.service.as_mut(), self.placement.as_deref_mut());
        let previous = self.state;
        self.finish(LifecycleState::Idle);
        tracing::info!(
            target: "anchor_lifecycle::controller",
            event = "cleared",
            %previous,
            released,
            "anchor slot cleared"
        );
    }

    /// Advances the state machine by one frame.
    ///
    /// At most one event is emitted per tick. Placement progress is only
    /// reported on ticks where the lifecycle itself stayed quiet.
    pub fn on_tick(&mut self) -> TickOutcome {
        let emitted_before = self.events.len();
        let outcome = self.advance();
        if self.events.len() == emitted_before {
            self.poll_placement();
        }
        outcome
    }

    fn busy(&self) -> Option<IgnoreReason> {
        if self.state.accepts_requests() {
            None
        } else {
            Some(IgnoreReason::Busy(self.state))
        }
    }

    fn ignore(&self, phase: OperationPhase, reason: IgnoreReason) -> RequestOutcome {
        tracing::debug!(
            target: "anchor_lifecycle::controller",
            event = "request_ignored",
            %phase,
            state = %self.state,
            ?reason,
            "request ignored"
        );
        RequestOutcome::Ignored(reason)
    }

    fn begin<F>(&mut self, phase: OperationPhase, start: F) -> Result<RequestOutcome, LifecycleError>
    where
        F: FnOnce(&mut dyn CloudAnchorService) -> Result<HeldAnchor, CloudServiceError>,
    {
        self.slot
            .clear(self.service.as_mut(), self.placement.as_deref_mut());
        let held = start(self.service.as_mut()).map_err(|source| {
            tracing::warn!(
                target: "anchor_lifecycle::controller",
                event = "request_refused",
                %phase,
                error = %source,
                "cloud service refused request"
            );
            LifecycleError::service(phase, source)
        })?;

        let generation =
            self.slot
                .install(held, self.service.as_mut(), self.placement.as_deref_mut());
        self.state = phase.in_flight_state();
        self.in_flight = Some(InFlight {
            phase,
            pending_ticks: 0,
        });

        tracing::info!(
            target: "anchor_lifecycle::controller",
            event = "request_started",
            %phase,
            generation,
            "cloud anchor operation started"
        );
        self.emit(match phase {
            OperationPhase::Hosting => LifecycleEvent::HostingStarted,
            OperationPhase::Resolving => LifecycleEvent::ResolvingStarted,
        });
        Ok(RequestOutcome::Started(phase))
    }

    fn advance(&mut self) -> TickOutcome {
        // Clearing or replacing the slot drops the in-flight record, so a
        // settlement is only ever read through the handle the slot holds now.
        let (Some(mut in_flight), Some(handle)) = (self.in_flight, self.slot.handle()) else {
            return TickOutcome::Inactive;
        };
        let status = self.service.status(handle);

        match status {
            CloudAnchorStatus::Pending => {
                in_flight.pending_ticks = in_flight.pending_ticks.saturating_add(1);
                self.in_flight = Some(in_flight);
                tracing::debug!(
                    target: "anchor_lifecycle::controller",
                    event = "operation_pending",
                    phase = %in_flight.phase,
                    ticks = in_flight.pending_ticks,
                    "cloud anchor operation still pending"
                );
                self.check_pending_limit(in_flight)
            }
            CloudAnchorStatus::Error(kind) => {
                self.finish(LifecycleState::Idle);
                tracing::warn!(
                    target: "anchor_lifecycle::controller",
                    event = "anchor_error",
                    phase = %in_flight.phase,
                    %kind,
                    "cloud anchor operation failed"
                );
                self.emit(LifecycleEvent::AnchorError {
                    kind,
                    phase: in_flight.phase,
                });
                TickOutcome::Settled(LifecycleState::Idle)
            }
            CloudAnchorStatus::Success(id) => self.settle_success(in_flight.phase, id),
        }
    }

    fn settle_success(&mut self, phase: OperationPhase, id: CloudAnchorId) -> TickOutcome {
        let next = match phase {
            OperationPhase::Hosting => {
                self.slot.record_cloud_id(id.clone());
                LifecycleState::Idle
            }
            OperationPhase::Resolving => match self.settings.resolved_policy() {
                ResolvedPolicy::Sticky => LifecycleState::Resolved,
                ResolvedPolicy::Reset => LifecycleState::Idle,
            },
        };
        self.finish(next);

        tracing::info!(
            target: "anchor_lifecycle::controller",
            event = "anchor_settled",
            %phase,
            cloud_id = %id,
            state = %next,
            "cloud anchor operation succeeded"
        );
        self.emit(match phase {
            OperationPhase::Hosting => LifecycleEvent::AnchorHosted { id },
            OperationPhase::Resolving => LifecycleEvent::AnchorResolved,
        });
        self.place_model();
        TickOutcome::Settled(next)
    }

    fn check_pending_limit(&mut self, in_flight: InFlight) -> TickOutcome {
        let Some(limit) = self.settings.pending_tick_limit() else {
            return TickOutcome::Pending;
        };
        if in_flight.pending_ticks < limit.get() {
            return TickOutcome::Pending;
        }

        self.finish(LifecycleState::Idle);
        tracing::warn!(
            target: "anchor_lifecycle::controller",
            event = "anchor_timed_out",
            phase = %in_flight.phase,
            ticks = in_flight.pending_ticks,
            "cloud anchor operation abandoned after pending limit"
        );
        self.emit(LifecycleEvent::AnchorTimedOut {
            phase: in_flight.phase,
            ticks: in_flight.pending_ticks,
        });
        TickOutcome::TimedOut
    }

    fn place_model(&mut self) {
        let Some(placement) = self.placement.as_deref_mut() else {
            return;
        };
        let Some(handle) = self.slot.handle() else {
            return;
        };

        let progress = match placement.place(handle, self.settings.model()) {
            Ok(ticket) => PlacementProgress::Loading(ticket),
            Err(error) => PlacementProgress::Refused(error),
        };
        self.slot.set_placement(progress);
    }

    fn poll_placement(&mut self) {
        let Some(progress) = self.slot.take_placement() else {
            return;
        };

        let ticket = match progress {
            PlacementProgress::Loading(ticket) => ticket,
            PlacementProgress::Placed(_) => {
                self.slot.set_placement(progress);
                return;
            }
            PlacementProgress::Refused(error) => {
                self.report_placement_failure(error.message().to_owned());
                return;
            }
        };

        let Some(placement) = self.placement.as_deref_mut() else {
            return;
        };
        match placement.poll(ticket) {
            PlacementStatus::Loading => self.slot.set_placement(PlacementProgress::Loading(ticket)),
            PlacementStatus::Placed => {
                self.slot.set_placement(PlacementProgress::Placed(ticket));
                let model = self.settings.model().clone();
                tracing::info!(
                    target: "anchor_lifecycle::placement",
                    event = "model_placed",
                    %model,
                    "model placed at anchor"
                );
                self.emit(LifecycleEvent::ModelPlaced { model });
            }
            PlacementStatus::Failed(reason) => self.report_placement_failure(reason),
        }
    }

    fn report_placement_failure(&mut self, reason: String) {
        let model = self.settings.model().clone();
        tracing::warn!(
            target: "anchor_lifecycle::placement",
            event = "placement_failed",
            %model,
            %reason,
            "model could not be placed"
        );
        self.emit(LifecycleEvent::PlacementFailed { model, reason });
    }

    fn finish(&mut self, next: LifecycleState) {
        self.in_flight = None;
        self.state = next;
    }

    fn emit(&mut self, event: LifecycleEvent) {
        tracing::debug!(
            target: "anchor_lifecycle::events",
            event = event.label(),
            "lifecycle event emitted"
        );
        self.events.push(event);
    }
}

impl Drop for AnchorLifecycleController {
    fn drop(&mut self) {
        self.slot
            .clear(self.service.as_mut(), self.placement.as_deref_mut());
    }
}
