//! Typed counters grouped into metric sets.
//!
//! A set is declared once through [`MetricSetBuilder`] and then shared as an
//! `Arc<MetricSet>` between the code that updates it and the registry that
//! renders it. Definitions never change after `create()`; only values do.

pub mod builder;
pub mod set;
pub mod types;

pub use builder::MetricSetBuilder;
pub use set::MetricSet;
pub use types::{CounterId, CounterType, MetricDefinition, MetricValue};
