use std::fmt;

/// Counter identifier, unique within one metric set.
pub type CounterId = u32;

/// Kind of value a counter holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterType {
    /// Unsigned 64-bit accumulator.
    U64Counter,
    /// Floating value overwritten on every set.
    FloatGauge,
    /// Observation count plus running sum.
    FloatAverage,
}

impl CounterType {
    /// Name used by the schema rendering.
    pub fn as_str(self) -> &'static str {
        match self {
            CounterType::U64Counter => "u64",
            CounterType::FloatGauge => "float",
            CounterType::FloatAverage => "float_avg",
        }
    }
}

impl fmt::Display for CounterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable counter descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDefinition {
    pub id: CounterId,
    pub name: String,
    pub kind: CounterType,
}

/// Point-in-time value of one counter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    U64(u64),
    Float(f64),
    FloatAverage { count: u64, sum: f64 },
}

impl MetricValue {
    pub fn kind(&self) -> CounterType {
        match self {
            MetricValue::U64(_) => CounterType::U64Counter,
            MetricValue::Float(_) => CounterType::FloatGauge,
            MetricValue::FloatAverage { .. } => CounterType::FloatAverage,
        }
    }
}
