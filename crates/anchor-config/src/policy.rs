//! Behavioural switches for the anchor lifecycle controller.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which tapped planes may create an anchor for hosting.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PlaneFilter {
    /// Floors, tables and other surfaces facing up.
    #[default]
    HorizontalUpward,
    /// Any detected plane.
    Any,
}

/// Lifecycle state entered after a resolve succeeds.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResolvedPolicy {
    /// Stay in `Resolved` until the anchor is cleared.
    #[default]
    Sticky,
    /// Return to `Idle` once the resolve has been reported.
    Reset,
}

/// Errors encountered while parsing policy values from text.
pub type PolicyParseError = strum::ParseError;
