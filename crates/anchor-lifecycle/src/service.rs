//! Abstractions over the cloud anchor service.

use std::error::Error;
use std::fmt;

use thiserror::Error;

use crate::anchor::{CloudAnchorHandle, CloudAnchorId, LocalAnchor};

/// Failure reported by the cloud service once an operation settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloudErrorKind {
    /// The app's credentials were rejected.
    NotAuthorized,
    /// Quota or rate limits were exceeded.
    ResourceExhausted,
    /// No hosted anchor matches the requested id. Resolve only.
    AnchorNotFound,
    /// The service could not be reached.
    ServiceUnavailable,
    /// Any other service-side failure.
    Internal,
}

impl fmt::Display for CloudErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotAuthorized => "not authorized",
            Self::ResourceExhausted => "resource exhausted",
            Self::AnchorNotFound => "anchor not found",
            Self::ServiceUnavailable => "service unavailable",
            Self::Internal => "internal service error",
        };
        formatter.write_str(label)
    }
}

/// Polled status of a host or resolve operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloudAnchorStatus {
    /// The operation has not settled yet.
    Pending,
    /// The operation succeeded; carries the durable cloud id.
    Success(CloudAnchorId),
    /// The operation failed.
    Error(CloudErrorKind),
}

/// Synchronous refusal to start a host or resolve call.
///
/// Distinct from [`CloudErrorKind`], which arrives later through polling.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CloudServiceError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl CloudServiceError {
    /// Builds an error without an underlying source.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error that wraps an underlying source.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Human-friendly description without the optional source.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Behaviour required from a cloud anchor service binding.
///
/// Host and resolve are fire-and-forget: they return a handle immediately and
/// the outcome is observed later through [`CloudAnchorService::status`]. None
/// of the methods may block on the network.
pub trait CloudAnchorService: Send {
    /// Starts uploading a local anchor.
    fn host(&mut self, anchor: LocalAnchor) -> Result<CloudAnchorHandle, CloudServiceError>;

    /// Starts locating a previously hosted anchor.
    fn resolve(&mut self, id: &CloudAnchorId) -> Result<CloudAnchorHandle, CloudServiceError>;

    /// Reads the current status of an operation.
    fn status(&mut self, handle: &CloudAnchorHandle) -> CloudAnchorStatus;

    /// Detaches the anchor from the scene. In-flight work is not cancelled.
    fn release(&mut self, handle: CloudAnchorHandle);
}

impl fmt::Debug for dyn CloudAnchorService {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("CloudAnchorService")
    }
}
