//! BDD test world wrapping a controller and its recording collaborators.

use std::num::NonZeroU32;

use anchor_config::ResolvedPolicy;

use crate::anchor::LocalAnchor;
use crate::controller::{AnchorLifecycleController, RequestOutcome, TickOutcome};
use crate::errors::LifecycleError;
use crate::events::LifecycleEvent;
use crate::input::PlaneOrientation;
use crate::placement::PlacementStatus;
use crate::service::CloudAnchorStatus;
use crate::settings::ControllerSettings;

use super::recording_placement::{RecordingPlacement, RecordingPlacementHandle};
use super::recording_service::{RecordingCloudService, RecordingServiceHandle};

/// Shared state exercised by BDD step implementations.
pub struct TestWorld {
    settings: ControllerSettings,
    with_placement: bool,
    /// Controller under test.
    pub controller: AnchorLifecycleController,
    service: RecordingServiceHandle,
    placement: RecordingPlacementHandle,
    next_anchor: u64,
    /// Events drained from the controller so far, in emission order.
    pub events: Vec<LifecycleEvent>,
    /// Outcome of the last host or resolve request.
    pub last_request: Option<RequestOutcome>,
    /// Outcome of the last tick.
    pub last_tick: Option<TickOutcome>,
    /// Last error returned by a request.
    pub last_error: Option<LifecycleError>,
}

impl TestWorld {
    /// Builds a world around an idle controller with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::build(ControllerSettings::default(), false)
    }

    fn build(settings: ControllerSettings, with_placement: bool) -> Self {
        let service = RecordingCloudService::new();
        let placement = RecordingPlacement::new();
        let service_handle = service.handle();
        let placement_handle = placement.handle();

        let mut controller = AnchorLifecycleController::new(Box::new(service), settings.clone());
        if with_placement {
            controller = controller.with_placement(Box::new(placement));
        }

        Self {
            settings,
            with_placement,
            controller,
            service: service_handle,
            placement: placement_handle,
            next_anchor: 0,
            events: Vec::new(),
            last_request: None,
            last_tick: None,
            last_error: None,
        }
    }

    fn rebuild(&mut self) {
        *self = Self::build(self.settings.clone(), self.with_placement);
    }

    /// Switches the resolved policy and rebuilds the controller.
    pub fn use_resolved_policy(&mut self, policy: ResolvedPolicy) {
        self.settings = self.settings.clone().with_resolved_policy(policy);
        self.rebuild();
    }

    /// Applies a pending tick limit and rebuilds the controller.
    pub fn use_pending_limit(&mut self, ticks: u32) {
        self.settings = self
            .settings
            .clone()
            .with_pending_tick_limit(NonZeroU32::new(ticks));
        self.rebuild();
    }

    /// Attaches a recording placement and rebuilds the controller.
    pub fn use_placement(&mut self) {
        self.with_placement = true;
        self.rebuild();
    }

    /// Recording handle for the cloud service.
    #[must_use]
    pub const fn service(&self) -> &RecordingServiceHandle {
        &self.service
    }

    /// Recording handle for the placement collaborator.
    #[must_use]
    pub const fn placement(&self) -> &RecordingPlacementHandle {
        &self.placement
    }

    /// Taps a plane with a fresh local anchor.
    pub fn tap(&mut self, plane: PlaneOrientation) {
        self.next_anchor += 1;
        let anchor = LocalAnchor::new(self.next_anchor);
        let result = self.controller.on_tap_to_host(anchor, plane);
        self.record_request(result);
    }

    /// Submits resolve text as typed by the user.
    pub fn submit_resolve(&mut self, text: &str) {
        let result = self.controller.request_resolve(text);
        self.record_request(result);
    }

    /// Clears the slot.
    pub fn clear(&mut self) {
        self.controller.clear();
        self.drain();
    }

    /// Runs `count` frame ticks.
    pub fn tick(&mut self, count: usize) {
        for _ in 0..count {
            self.last_tick = Some(self.controller.on_tick());
            self.drain();
        }
    }

    /// Scripts the status of the operation started last.
    pub fn settle(&self, status: CloudAnchorStatus) {
        self.service.settle_latest(status);
    }

    /// Scripts the progress of the most recent placement.
    pub fn settle_placement(&self, status: PlacementStatus) {
        self.placement.settle_latest(status);
    }

    /// Labels of every event drained so far.
    #[must_use]
    pub fn event_labels(&self) -> Vec<&'static str> {
        self.events.iter().map(LifecycleEvent::label).collect()
    }

    fn record_request(&mut self, result: Result<RequestOutcome, LifecycleError>) {
        self.last_request = None;
        self.last_error = None;
        match result {
            Ok(outcome) => self.last_request = Some(outcome),
            Err(error) => self.last_error = Some(error),
        }
        self.drain();
    }

    fn drain(&mut self) {
        self.events.extend(self.controller.take_events());
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}
