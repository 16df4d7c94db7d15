use std::sync::Arc;
use std::time::Duration;

use proflog_core::error::Result;
use proflog_core::{CounterId, MetricSet, MetricSetBuilder};

pub const ADMIN_SET_NAME: &str = "proflog_admin";

pub const ADMIN_FIRST: CounterId = 100;
pub const ADMIN_REQUESTS: CounterId = 101;
pub const ADMIN_ERRORS: CounterId = 102;
pub const ADMIN_REQUEST_MS: CounterId = 103;
pub const ADMIN_LAST: CounterId = 104;

/// `requests` / `errors` u64 counters and a `request_ms` average.
pub struct AdminMetrics {
    set: Arc<MetricSet>,
}

impl AdminMetrics {
    pub fn new() -> Result<Self> {
        let mut bld = MetricSetBuilder::new(ADMIN_SET_NAME, ADMIN_FIRST, ADMIN_LAST)?;
        bld.add_u64(ADMIN_REQUESTS, "requests")?;
        bld.add_u64(ADMIN_ERRORS, "errors")?;
        bld.add_float_avg(ADMIN_REQUEST_MS, "request_ms")?;
        Ok(Self {
            set: Arc::new(bld.create()),
        })
    }

    /// The backing set, for registering into a registry.
    pub fn set(&self) -> Arc<MetricSet> {
        Arc::clone(&self.set)
    }

    /// Account one answered request.
    pub fn record(&self, ok: bool, elapsed: Duration) {
        let res = self
            .set
            .inc(ADMIN_REQUESTS)
            .and_then(|_| if ok { Ok(()) } else { self.set.inc(ADMIN_ERRORS) })
            .and_then(|_| self.set.finc(ADMIN_REQUEST_MS, elapsed.as_secs_f64() * 1000.0));
        if let Err(e) = res {
            tracing::warn!(error = %e, "admin metrics update failed");
        }
    }
}
