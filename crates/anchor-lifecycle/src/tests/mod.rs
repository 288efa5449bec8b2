//! Crate-internal tests for the lifecycle controller.

mod support;
