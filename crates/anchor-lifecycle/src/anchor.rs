//! Identifiers exchanged with the AR session and the cloud anchor service.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};

/// Anchor created by the AR session at a tapped point, before hosting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalAnchor(u64);

impl LocalAnchor {
    /// Wraps the session's identifier for a freshly created anchor.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Session identifier of the anchor.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Scene anchor returned by the cloud service for a host or resolve call.
///
/// The handle doubles as the anchor reference handed to placement. Only the
/// service creates handles; the controller owns them until released.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct CloudAnchorHandle(u64);

impl CloudAnchorHandle {
    /// Wraps a service-assigned handle identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Service-assigned identifier of the handle.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CloudAnchorHandle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "handle#{}", self.0)
    }
}

/// Durable, shareable identifier assigned by the cloud service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CloudAnchorId(String);

impl CloudAnchorId {
    /// Parses user-entered text, trimming surrounding whitespace.
    ///
    /// Returns `None` when nothing but whitespace was entered.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    /// Identifier as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CloudAnchorId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Model asset to instantiate at a settled anchor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelRef(Utf8PathBuf);

impl ModelRef {
    /// Builds a reference to the supplied asset path.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self(path.into())
    }

    /// Asset path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        self.0.as_path()
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}
