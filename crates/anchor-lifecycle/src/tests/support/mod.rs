//! Shared fixtures and helpers for controller tests.

mod recording_service;
mod world;

use rstest::fixture;

use crate::anchor::{CloudAnchorId, LocalAnchor};
use crate::service::{CloudAnchorStatus, CloudErrorKind};
use crate::state::LifecycleState;

pub use recording_placement::{PlacementCall, RecordingPlacement, RecordingPlacementHandle};
pub use recording_service::{RecordingCloudService, RecordingServiceHandle, ServiceCall};
pub use world::TestWorld;

/// Local anchor used when a test does not care which one is hosted.
#[fixture]
pub fn tapped_anchor() -> LocalAnchor {
    LocalAnchor::new(7)
}

/// Successful settlement carrying `id`.
///
/// # Panics
///
/// Panics when `id` is blank.
#[must_use]
pub fn success(id: &str) -> CloudAnchorStatus {
    let Some(id) = CloudAnchorId::parse(id) else {
        panic!("test cloud id must not be blank");
    };
    CloudAnchorStatus::Success(id)
}

/// Parses a lifecycle state name as written in feature files.
///
/// # Panics
///
/// Panics on an unknown name.
#[must_use]
pub fn parse_state(name: &str) -> LifecycleState {
    match name {
        "idle" => LifecycleState::Idle,
        "hosting" => LifecycleState::Hosting,
        "resolving" => LifecycleState::Resolving,
        "resolved" => LifecycleState::Resolved,
        other => panic!("unknown lifecycle state `{other}`"),
    }
}

/// Parses a cloud error kind as written in feature files.
///
/// # Panics
///
/// Panics on an unknown name.
#[must_use]
pub fn parse_error_kind(name: &str) -> CloudErrorKind {
    match name {
        "not authorized" => CloudErrorKind::NotAuthorized,
        "resource exhausted" => CloudErrorKind::ResourceExhausted,
        "anchor not found" => CloudErrorKind::AnchorNotFound,
        "service unavailable" => CloudErrorKind::ServiceUnavailable,
        "internal" => CloudErrorKind::Internal,
        other => panic!("unknown cloud error kind `{other}`"),
    }
}
