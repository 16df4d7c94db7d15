//! proflog core: typed performance counters, the metric registry, and the
//! admin socket wire contract.
//!
//! This crate owns everything that does not need a runtime: counter cells,
//! the set builder, the ordered registry and its text rendering, and the
//! length-prefixed framing shared by the admin socket server and client. It
//! intentionally carries no transport or async dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Misuse of a counter (wrong type, unknown id) and malformed frames surface as
//! `ProflogError` so a host process never crashes because of instrumentation.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod dump;
pub mod error;
pub mod metrics;
pub mod protocol;
pub mod registry;

/// Shared result type.
pub use error::{Result, ProflogError};
pub use metrics::{CounterId, CounterType, MetricDefinition, MetricSet, MetricSetBuilder, MetricValue};
pub use registry::MetricRegistry;
