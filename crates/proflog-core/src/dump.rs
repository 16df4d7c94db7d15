//! Text rendering of registry snapshots.
//!
//! Layout: `{"<set>":{"<counter>":<value>,...,},...,}`. Every member carries a
//! trailing comma, including the last one; an empty registry renders as `{}`.
//!
//! Value rules:
//! - u64 counters: decimal integer.
//! - floats: shortest round-trip form, integral values without a fraction
//!   (`125`, never `125.0`); non-finite values become `null`.
//! - averages: `{"count":<u64>,"sum":<float>}`.

use std::fmt::Write;
use std::sync::Arc;

use crate::metrics::{MetricSet, MetricValue};

/// Push `name` as a JSON string literal.
fn write_key(out: &mut String, name: &str) {
    out.push_str(&serde_json::Value::from(name).to_string());
}

fn write_float(out: &mut String, v: f64) {
    if v.is_finite() {
        // `Debug` is shortest round-trip, switching to exponent form at
        // extreme magnitudes; integral values lose their `.0`.
        let s = format!("{v:?}");
        out.push_str(s.strip_suffix(".0").unwrap_or(&s));
    } else {
        out.push_str("null");
    }
}

fn write_value(out: &mut String, value: &MetricValue) {
    match *value {
        MetricValue::U64(v) => {
            let _ = write!(out, "{v}");
        }
        MetricValue::Float(v) => write_float(out, v),
        MetricValue::FloatAverage { count, sum } => {
            let _ = write!(out, "{{\"count\":{count},\"sum\":");
            write_float(out, sum);
            out.push('}');
        }
    }
}

/// Walk sets in order, letting `body` fill in each set's members.
fn render_sets<F>(sets: &[Arc<MetricSet>], mut body: F) -> String
where
    F: FnMut(&mut String, &MetricSet),
{
    let mut out = String::from("{");
    for set in sets {
        write_key(&mut out, set.name());
        out.push_str(":{");
        body(&mut out, set);
        out.push_str("},");
    }
    out.push('}');
    out
}

/// Render current counter values of every set.
pub fn render_dump(sets: &[Arc<MetricSet>]) -> String {
    render_sets(sets, |out, set| {
        for (def, value) in set.snapshot() {
            write_key(out, &def.name);
            out.push(':');
            write_value(out, &value);
            out.push(',');
        }
    })
}

/// Render the counter types of every set, in the same envelope as the dump.
pub fn render_schema(sets: &[Arc<MetricSet>]) -> String {
    render_sets(sets, |out, set| {
        for def in set.definitions() {
            write_key(out, &def.name);
            let _ = write!(out, ":{{\"type\":\"{}\"}},", def.kind.as_str());
        }
    })
}
