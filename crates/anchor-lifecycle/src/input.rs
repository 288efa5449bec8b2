//! Inbound actions from the presentation layer.

use std::fmt;

use anchor_config::PlaneFilter;

use crate::anchor::LocalAnchor;
use crate::controller::{AnchorLifecycleController, RequestOutcome, TickOutcome};
use crate::errors::LifecycleError;

/// Orientation of the plane under a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneOrientation {
    /// Floors and table tops.
    HorizontalUpward,
    /// Ceilings.
    HorizontalDownward,
    /// Walls.
    Vertical,
}

impl PlaneOrientation {
    /// Whether the filter lets taps on this plane create an anchor.
    #[must_use]
    pub const fn admitted_by(self, filter: PlaneFilter) -> bool {
        match filter {
            PlaneFilter::Any => true,
            PlaneFilter::HorizontalUpward => matches!(self, Self::HorizontalUpward),
        }
    }
}

impl fmt::Display for PlaneOrientation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::HorizontalUpward => "horizontal upward",
            Self::HorizontalDownward => "horizontal downward",
            Self::Vertical => "vertical",
        };
        formatter.write_str(label)
    }
}

/// Action forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationInput {
    /// The user tapped a detected plane.
    TapToHost {
        /// Anchor the AR session created at the tap.
        anchor: LocalAnchor,
        /// Orientation of the tapped plane.
        plane: PlaneOrientation,
    },
    /// The user submitted text from the resolve field.
    SubmitResolve(String),
    /// The user pressed clear.
    ClearRequested,
    /// The render loop produced a frame.
    FrameTick,
}

/// Result of dispatching a [`PresentationInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Outcome of a host or resolve request.
    Request(RequestOutcome),
    /// The slot was cleared.
    Cleared,
    /// Outcome of a frame tick.
    Tick(TickOutcome),
}

impl AnchorLifecycleController {
    /// Routes a presentation action to the matching controller operation.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Service`] when a request is refused by the
    /// cloud service.
    pub fn dispatch(&mut self, input: PresentationInput) -> Result<DispatchOutcome, LifecycleError> {
        match input {
            PresentationInput::TapToHost { anchor, plane } => self
                .on_tap_to_host(anchor, plane)
                .map(DispatchOutcome::Request),
            PresentationInput::SubmitResolve(text) => self
                .request_resolve(&text)
                .map(DispatchOutcome::Request),
            PresentationInput::ClearRequested => {
                self.clear();
                Ok(DispatchOutcome::Cleared)
            }
            PresentationInput::FrameTick => Ok(DispatchOutcome::Tick(self.on_tick())),
        }
    }
}
