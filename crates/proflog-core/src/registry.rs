//! Metric registry: ordered collection of metric sets.
//!
//! One coarse mutex guards the ordered list. It is held while the structure
//! changes or while a dump is rendered into a `String`, and released before
//! the caller does any I/O with the result. Counter values are not covered by
//! this lock; they carry their own synchronization.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::dump;
use crate::error::{ProflogError, Result};
use crate::metrics::MetricSet;

#[derive(Debug, Default)]
pub struct MetricRegistry {
    sets: Mutex<Vec<Arc<MetricSet>>>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The list is only ever left in a consistent state, so recover from poison.
    fn sets(&self) -> MutexGuard<'_, Vec<Arc<MetricSet>>> {
        self.sets.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append a set. A set with the same name already present is a conflict
    /// and leaves the registry unchanged.
    pub fn add(&self, set: Arc<MetricSet>) -> Result<()> {
        let mut sets = self.sets();
        if sets.iter().any(|s| s.name() == set.name()) {
            tracing::warn!(set = %set.name(), "metric set name already registered");
            return Err(ProflogError::NameConflict(set.name().to_string()));
        }
        tracing::debug!(set = %set.name(), "metric set registered");
        sets.push(set);
        Ok(())
    }

    /// Remove a set by identity. Returns whether it was present.
    pub fn remove(&self, set: &Arc<MetricSet>) -> bool {
        let mut sets = self.sets();
        let Some(pos) = sets.iter().position(|s| Arc::ptr_eq(s, set)) else {
            return false;
        };
        sets.remove(pos);
        tracing::debug!(set = %set.name(), "metric set removed");
        true
    }

    /// Remove a set by name, handing it back to the caller.
    pub fn remove_named(&self, name: &str) -> Option<Arc<MetricSet>> {
        let mut sets = self.sets();
        let pos = sets.iter().position(|s| s.name() == name)?;
        tracing::debug!(set = %name, "metric set removed");
        Some(sets.remove(pos))
    }

    pub fn clear(&self) {
        self.sets().clear();
    }

    pub fn get(&self, name: &str) -> Option<Arc<MetricSet>> {
        self.sets().iter().find(|s| s.name() == name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.sets().iter().map(|s| s.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.sets().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets().is_empty()
    }

    /// Render every registered set's current values.
    pub fn dump(&self) -> String {
        dump::render_dump(&self.sets())
    }

    /// Render every registered set's counter types.
    pub fn schema(&self) -> String {
        dump::render_schema(&self.sets())
    }
}
