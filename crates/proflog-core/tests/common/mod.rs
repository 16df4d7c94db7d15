//! Metric set fixtures shared by registry tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]

use std::sync::Arc;

use proflog_core::{MetricSet, MetricSetBuilder};

pub const SET1_FIRST: u32 = 200;
pub const SET1_ELEMENT_1: u32 = 201;
pub const SET1_ELEMENT_2: u32 = 202;
pub const SET1_ELEMENT_3: u32 = 203;
pub const SET1_LAST: u32 = 204;

pub const SET2_FIRST: u32 = 400;
pub const SET2_FOO: u32 = 401;
pub const SET2_BAR: u32 = 402;
pub const SET2_LAST: u32 = 403;

/// `element1` u64, `element2` gauge, `element3` average.
pub fn fake_set_1() -> Arc<MetricSet> {
    let mut bld = MetricSetBuilder::new("fake_proflogger_1", SET1_FIRST, SET1_LAST).unwrap();
    bld.add_u64(SET1_ELEMENT_1, "element1").unwrap();
    bld.add_float(SET1_ELEMENT_2, "element2").unwrap();
    bld.add_float_avg(SET1_ELEMENT_3, "element3").unwrap();
    Arc::new(bld.create())
}

/// `foo` u64, `bar` gauge.
pub fn fake_set_2() -> Arc<MetricSet> {
    let mut bld = MetricSetBuilder::new("fake_proflogger_2", SET2_FIRST, SET2_LAST).unwrap();
    bld.add_u64(SET2_FOO, "foo").unwrap();
    bld.add_float(SET2_BAR, "bar").unwrap();
    Arc::new(bld.create())
}

/// Test expectations are written with single quotes for readability.
pub fn sd(s: &str) -> String {
    s.replace('\'', "\"")
}
