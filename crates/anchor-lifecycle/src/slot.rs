//! The single anchor slot owned by the controller.
//!
//! The slot holds at most one anchor. Installing a new anchor or clearing the
//! slot first removes any placed content and releases the previous handle, so
//! there is never a moment where two anchors are owned. Every install and
//! clear bumps the slot generation, which tags log records so successive
//! occupants can be told apart.

use crate::anchor::{CloudAnchorHandle, CloudAnchorId, LocalAnchor};
use crate::placement::{Placement, PlacementError, PlacementTicket};
use crate::service::CloudAnchorService;

/// How the held anchor came into the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorOrigin {
    /// Created locally and submitted for hosting.
    Local(LocalAnchor),
    /// Fetched from the cloud by id.
    Cloud(CloudAnchorId),
}

/// Placement progress for the held anchor.
#[derive(Debug)]
pub(crate) enum PlacementProgress {
    Loading(PlacementTicket),
    Placed(PlacementTicket),
    Refused(PlacementError),
}

impl PlacementProgress {
    const fn ticket(&self) -> Option<PlacementTicket> {
        match self {
            Self::Loading(ticket) | Self::Placed(ticket) => Some(*ticket),
            Self::Refused(_) => None,
        }
    }
}

#[derive(Debug)]
pub(crate) struct HeldAnchor {
    handle: CloudAnchorHandle,
    origin: AnchorOrigin,
    placement: Option<PlacementProgress>,
}

impl HeldAnchor {
    pub(crate) fn new(handle: CloudAnchorHandle, origin: AnchorOrigin) -> Self {
        Self {
            handle,
            origin,
            placement: None,
        }
    }
}

/// Exclusive owner of the active anchor.
#[derive(Debug, Default)]
pub struct AnchorSlot {
    held: Option<HeldAnchor>,
    cloud_id: Option<CloudAnchorId>,
    generation: u64,
}

impl AnchorSlot {
    /// Whether an anchor is currently held.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.held.is_some()
    }

    /// Handle of the held anchor.
    #[must_use]
    pub fn handle(&self) -> Option<&CloudAnchorHandle> {
        self.held.as_ref().map(|held| &held.handle)
    }

    /// Origin of the held anchor.
    #[must_use]
    pub fn origin(&self) -> Option<&AnchorOrigin> {
        self.held.as_ref().map(|held| &held.origin)
    }

    /// Local anchor submitted for hosting, if that is what the slot holds.
    #[must_use]
    pub fn local_anchor(&self) -> Option<LocalAnchor> {
        match self.origin() {
            Some(AnchorOrigin::Local(anchor)) => Some(*anchor),
            Some(AnchorOrigin::Cloud(_)) | None => None,
        }
    }

    /// Cloud id recorded after a successful host.
    #[must_use]
    pub const fn cloud_id(&self) -> Option<&CloudAnchorId> {
        self.cloud_id.as_ref()
    }

    /// Counter bumped on every install and clear.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Releases the current anchor, then takes ownership of `anchor`.
    ///
    /// Returns the generation that identifies the new occupant.
    pub(crate) fn install(
        &mut self,
        anchor: HeldAnchor,
        service: &mut dyn CloudAnchorService,
        placement: Option<&mut (dyn Placement + 'static)>,
    ) -> u64 {
        self.release_held(service, placement);
        self.held = Some(anchor);
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Releases the current anchor and forgets the cloud id.
    ///
    /// Returns whether an anchor was released.
    pub(crate) fn clear(
        &mut self,
        service: &mut dyn CloudAnchorService,
        placement: Option<&mut (dyn Placement + 'static)>,
    ) -> bool {
        let released = self.release_held(service, placement);
        self.generation = self.generation.wrapping_add(1);
        released
    }

    pub(crate) fn record_cloud_id(&mut self, id: CloudAnchorId) {
        self.cloud_id = Some(id);
    }

    pub(crate) fn set_placement(&mut self, progress: PlacementProgress) {
        if let Some(held) = self.held.as_mut() {
            held.placement = Some(progress);
        }
    }

    pub(crate) fn take_placement(&mut self) -> Option<PlacementProgress> {
        self.held.as_mut().and_then(|held| held.placement.take())
    }

    fn release_held(
        &mut self,
        service: &mut dyn CloudAnchorService,
        placement: Option<&mut (dyn Placement + 'static)>,
    ) -> bool {
        self.cloud_id = None;
        let Some(held) = self.held.take() else {
            return false;
        };

        let ticket = held.placement.as_ref().and_then(PlacementProgress::ticket);
        if let (Some(ticket), Some(placement)) = (ticket, placement) {
            placement.remove(ticket);
        }

        tracing::debug!(
            target: "anchor_lifecycle::slot",
            handle = held.handle.id(),
            generation = self.generation,
            "releasing anchor"
        );
        service.release(held.handle);
        true
    }
}
