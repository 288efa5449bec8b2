//! Recording cloud anchor service used in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::anchor::{CloudAnchorHandle, CloudAnchorId, LocalAnchor};
use crate::service::{CloudAnchorService, CloudAnchorStatus, CloudServiceError};

/// Call observed by the stub service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    /// `host` was invoked for the anchor.
    Host(LocalAnchor),
    /// `resolve` was invoked for the id.
    Resolve(String),
    /// `status` was polled for the handle id.
    Status(u64),
    /// `release` was invoked for the handle id.
    Release(u64),
}

/// Test double that records every call and reports scripted statuses.
///
/// Handles are numbered from 1 in creation order. Every handle reports
/// `Pending` until a status is scripted for it.
#[derive(Clone, Default)]
pub struct RecordingCloudService {
    shared: Arc<Mutex<ServiceState>>,
}

impl RecordingCloudService {
    /// Creates a service whose operations stay pending until scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle that can script statuses and inspect calls.
    #[must_use]
    pub fn handle(&self) -> RecordingServiceHandle {
        RecordingServiceHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    fn issue(&mut self, call: ServiceCall) -> Result<CloudAnchorHandle, CloudServiceError> {
        with_state(&self.shared, |state| {
            state.calls.push(call);
            if let Some(message) = state.refuse_next.take() {
                return Err(CloudServiceError::new(message));
            }
            state.next_handle += 1;
            Ok(CloudAnchorHandle::new(state.next_handle))
        })
    }
}

impl CloudAnchorService for RecordingCloudService {
    fn host(&mut self, anchor: LocalAnchor) -> Result<CloudAnchorHandle, CloudServiceError> {
        self.issue(ServiceCall::Host(anchor))
    }

    fn resolve(&mut self, id: &CloudAnchorId) -> Result<CloudAnchorHandle, CloudServiceError> {
        self.issue(ServiceCall::Resolve(id.as_str().to_owned()))
    }

    fn status(&mut self, handle: &CloudAnchorHandle) -> CloudAnchorStatus {
        with_state(&self.shared, |state| {
            state.calls.push(ServiceCall::Status(handle.id()));
            state
                .statuses
                .get(&handle.id())
                .cloned()
                .unwrap_or(CloudAnchorStatus::Pending)
        })
    }

    fn release(&mut self, handle: CloudAnchorHandle) {
        with_state(&self.shared, |state| {
            state.calls.push(ServiceCall::Release(handle.id()));
        });
    }
}

/// Handle that exposes recorded state and scripts outcomes.
#[derive(Clone)]
pub struct RecordingServiceHandle {
    shared: Arc<Mutex<ServiceState>>,
}

impl RecordingServiceHandle {
    /// Returns the ordered list of calls the service observed.
    #[must_use]
    pub fn calls(&self) -> Vec<ServiceCall> {
        with_state(&self.shared, |state| state.calls.clone())
    }

    /// Returns the handle ids released so far, in order.
    #[must_use]
    pub fn released(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ServiceCall::Release(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Number of status polls observed.
    #[must_use]
    pub fn status_polls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, ServiceCall::Status(_)))
            .count()
    }

    /// Identifier of the most recently issued handle.
    #[must_use]
    pub fn latest_handle(&self) -> Option<u64> {
        with_state(&self.shared, |state| {
            (state.next_handle > 0).then_some(state.next_handle)
        })
    }

    /// Scripts the status reported for a specific handle.
    pub fn set_status(&self, handle: u64, status: CloudAnchorStatus) {
        with_state(&self.shared, |state| {
            state.statuses.insert(handle, status);
        });
    }

    /// Scripts the status reported for the most recently issued handle.
    ///
    /// # Panics
    ///
    /// Panics when no handle has been issued yet.
    pub fn settle_latest(&self, status: CloudAnchorStatus) {
        let Some(handle) = self.latest_handle() else {
            panic!("no handle has been issued yet");
        };
        self.set_status(handle, status);
    }

    /// Makes the next host or resolve call fail synchronously.
    pub fn refuse_next(&self, message: impl Into<String>) {
        with_state(&self.shared, |state| {
            state.refuse_next = Some(message.into());
        });
    }
}

fn with_state<R, F>(shared: &Arc<Mutex<ServiceState>>, action: F) -> R
where
    F: FnOnce(&mut ServiceState) -> R,
{
    let mut guard = shared.lock().unwrap_or_else(|poison| poison.into_inner());
    action(&mut guard)
}

#[derive(Debug, Default)]
struct ServiceState {
    calls: Vec<ServiceCall>,
    statuses: HashMap<u64, CloudAnchorStatus>,
    next_handle: u64,
    refuse_next: Option<String>,
}
