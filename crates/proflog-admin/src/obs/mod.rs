//! Self-instrumentation of the admin socket.
//!
//! The server keeps its own request counters in an ordinary metric set so the
//! host can choose to expose them through the same dump.

pub mod metrics;

pub use metrics::AdminMetrics;
