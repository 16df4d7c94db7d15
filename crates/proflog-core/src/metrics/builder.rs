//! Metric set builder.
//!
//! Validation rules:
//! - The declared range must leave room for at least one id (`last > first + 1`).
//! - Every id must satisfy `first < id < last` and be unused in this builder.
//! - Counter names are unique within the builder.
//!
//! `create` consumes the builder, so a finished builder cannot be reused.

use std::collections::HashSet;

use crate::error::{ProflogError, Result};
use crate::metrics::set::MetricSet;
use crate::metrics::types::{CounterId, CounterType, MetricDefinition};

/// Accumulates counter definitions for one metric set.
#[derive(Debug)]
pub struct MetricSetBuilder {
    name: String,
    first_id: CounterId,
    last_id: CounterId,
    definitions: Vec<MetricDefinition>,
    ids: HashSet<CounterId>,
    names: HashSet<String>,
}

impl MetricSetBuilder {
    pub fn new(name: impl Into<String>, first_id: CounterId, last_id: CounterId) -> Result<Self> {
        let name = name.into();
        if last_id <= first_id.saturating_add(1) {
            return Err(ProflogError::Definition(format!(
                "set {name}: range ({first_id}, {last_id}) holds no ids"
            )));
        }
        Ok(Self {
            name,
            first_id,
            last_id,
            definitions: Vec::new(),
            ids: HashSet::new(),
            names: HashSet::new(),
        })
    }

    pub fn add_u64(&mut self, id: CounterId, name: &str) -> Result<&mut Self> {
        self.add(id, name, CounterType::U64Counter)
    }

    pub fn add_float(&mut self, id: CounterId, name: &str) -> Result<&mut Self> {
        self.add(id, name, CounterType::FloatGauge)
    }

    pub fn add_float_avg(&mut self, id: CounterId, name: &str) -> Result<&mut Self> {
        self.add(id, name, CounterType::FloatAverage)
    }

    fn add(&mut self, id: CounterId, name: &str, kind: CounterType) -> Result<&mut Self> {
        if id <= self.first_id || id >= self.last_id {
            return Err(ProflogError::Definition(format!(
                "set {}: id {id} outside ({}, {})",
                self.name, self.first_id, self.last_id
            )));
        }
        if self.ids.contains(&id) {
            return Err(ProflogError::Definition(format!(
                "set {}: duplicate id {id}",
                self.name
            )));
        }
        if self.names.contains(name) {
            return Err(ProflogError::Definition(format!(
                "set {}: duplicate counter name {name}",
                self.name
            )));
        }

        self.ids.insert(id);
        self.names.insert(name.to_string());
        self.definitions.push(MetricDefinition {
            id,
            name: name.to_string(),
            kind,
        });
        Ok(self)
    }

    /// Finalize into a metric set with every value zeroed.
    pub fn create(self) -> MetricSet {
        tracing::debug!(set = %self.name, counters = self.definitions.len(), "metric set created");
        MetricSet::new(self.name, self.first_id, self.last_id, self.definitions)
    }
}
