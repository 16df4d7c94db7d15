//! Metric set: a named, fixed collection of typed counters.
//!
//! Every counter slot is synchronized on its own. Integer counters and gauges
//! are single atomics (gauges store the `f64` bit pattern); averages pair a
//! count with a sum and sit behind a per-counter mutex so both halves move
//! together. A snapshot therefore reads each counter atomically but makes no
//! promise about consistency across counters.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::error::{ProflogError, Result};
use crate::metrics::types::{CounterId, CounterType, MetricDefinition, MetricValue};

#[derive(Debug, Default)]
struct Average {
    count: u64,
    sum: f64,
}

#[derive(Debug)]
enum CounterCell {
    U64(AtomicU64),
    Float(AtomicU64),
    FloatAverage(Mutex<Average>),
}

impl CounterCell {
    fn new(kind: CounterType) -> Self {
        match kind {
            CounterType::U64Counter => CounterCell::U64(AtomicU64::new(0)),
            CounterType::FloatGauge => CounterCell::Float(AtomicU64::new(0f64.to_bits())),
            CounterType::FloatAverage => CounterCell::FloatAverage(Mutex::new(Average::default())),
        }
    }

    fn kind(&self) -> CounterType {
        match self {
            CounterCell::U64(_) => CounterType::U64Counter,
            CounterCell::Float(_) => CounterType::FloatGauge,
            CounterCell::FloatAverage(_) => CounterType::FloatAverage,
        }
    }

    fn load(&self) -> MetricValue {
        match self {
            CounterCell::U64(v) => MetricValue::U64(v.load(Ordering::Relaxed)),
            CounterCell::Float(bits) => MetricValue::Float(f64::from_bits(bits.load(Ordering::Relaxed))),
            CounterCell::FloatAverage(avg) => {
                let avg = lock(avg);
                MetricValue::FloatAverage {
                    count: avg.count,
                    sum: avg.sum,
                }
            }
        }
    }
}

/// A mutex only guards plain numbers here, so a poisoned lock still holds a
/// usable value.
fn lock(avg: &Mutex<Average>) -> MutexGuard<'_, Average> {
    avg.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Named collection of counters sharing one id namespace.
#[derive(Debug)]
pub struct MetricSet {
    name: String,
    first_id: CounterId,
    last_id: CounterId,
    definitions: Vec<MetricDefinition>,
    /// Parallel to `definitions`.
    cells: Vec<CounterCell>,
    index: HashMap<CounterId, usize>,
}

impl MetricSet {
    pub(crate) fn new(
        name: String,
        first_id: CounterId,
        last_id: CounterId,
        definitions: Vec<MetricDefinition>,
    ) -> Self {
        let cells = definitions.iter().map(|d| CounterCell::new(d.kind)).collect();
        let index = definitions
            .iter()
            .enumerate()
            .map(|(pos, d)| (d.id, pos))
            .collect();
        Self {
            name,
            first_id,
            last_id,
            definitions,
            cells,
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn first_id(&self) -> CounterId {
        self.first_id
    }

    pub fn last_id(&self) -> CounterId {
        self.last_id
    }

    /// Counter definitions in declaration order.
    pub fn definitions(&self) -> &[MetricDefinition] {
        &self.definitions
    }

    fn cell(&self, id: CounterId, expected: CounterType) -> Result<&CounterCell> {
        let cell = self
            .index
            .get(&id)
            .and_then(|&pos| self.cells.get(pos))
            .ok_or(ProflogError::UnknownCounter(id))?;
        let actual = cell.kind();
        if actual != expected {
            return Err(ProflogError::TypeMismatch { id, expected, actual });
        }
        Ok(cell)
    }

    /// Increment a u64 counter by 1.
    pub fn inc(&self, id: CounterId) -> Result<()> {
        self.inc_by(id, 1)
    }

    /// Increment a u64 counter by an arbitrary amount.
    pub fn inc_by(&self, id: CounterId, amount: u64) -> Result<()> {
        match self.cell(id, CounterType::U64Counter)? {
            CounterCell::U64(v) => {
                v.fetch_add(amount, Ordering::Relaxed);
                Ok(())
            }
            _ => Err(ProflogError::Internal(format!("counter {id} cell/kind disagree"))),
        }
    }

    /// Overwrite a float gauge.
    pub fn fset(&self, id: CounterId, value: f64) -> Result<()> {
        match self.cell(id, CounterType::FloatGauge)? {
            CounterCell::Float(bits) => {
                bits.store(value.to_bits(), Ordering::Relaxed);
                Ok(())
            }
            _ => Err(ProflogError::Internal(format!("counter {id} cell/kind disagree"))),
        }
    }

    /// Record one observation on a float average: `count += 1`, `sum += amount`.
    pub fn finc(&self, id: CounterId, amount: f64) -> Result<()> {
        match self.cell(id, CounterType::FloatAverage)? {
            CounterCell::FloatAverage(avg) => {
                let mut avg = lock(avg);
                avg.count += 1;
                avg.sum += amount;
                Ok(())
            }
            _ => Err(ProflogError::Internal(format!("counter {id} cell/kind disagree"))),
        }
    }

    /// Current value of a single counter.
    pub fn get(&self, id: CounterId) -> Result<MetricValue> {
        let pos = self.index.get(&id).ok_or(ProflogError::UnknownCounter(id))?;
        self.cells
            .get(*pos)
            .map(CounterCell::load)
            .ok_or(ProflogError::UnknownCounter(id))
    }

    /// Current values in definition order.
    pub fn snapshot(&self) -> Vec<(&MetricDefinition, MetricValue)> {
        self.definitions
            .iter()
            .zip(self.cells.iter())
            .map(|(def, cell)| (def, cell.load()))
            .collect()
    }
}
