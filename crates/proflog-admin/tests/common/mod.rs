//! Shared fixtures for admin socket tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use proflog_admin::config::AdminSection;
use proflog_admin::{AdminSocket, AppState};
use proflog_core::{MetricRegistry, MetricSet, MetricSetBuilder};
use tempfile::TempDir;

pub const SET1_FIRST: u32 = 200;
pub const SET1_ELEMENT_1: u32 = 201;
pub const SET1_ELEMENT_2: u32 = 202;
pub const SET1_ELEMENT_3: u32 = 203;
pub const SET1_LAST: u32 = 204;

pub const SET2_FIRST: u32 = 400;
pub const SET2_FOO: u32 = 401;
pub const SET2_BAR: u32 = 402;
pub const SET2_LAST: u32 = 403;

pub fn fake_set_1() -> Arc<MetricSet> {
    let mut bld = MetricSetBuilder::new("fake_proflogger_1", SET1_FIRST, SET1_LAST).unwrap();
    bld.add_u64(SET1_ELEMENT_1, "element1").unwrap();
    bld.add_float(SET1_ELEMENT_2, "element2").unwrap();
    bld.add_float_avg(SET1_ELEMENT_3, "element3").unwrap();
    Arc::new(bld.create())
}

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

/// A registry served on a socket inside a private temp dir.
pub struct Harness {
    pub dir: TempDir,
    pub registry: Arc<MetricRegistry>,
    pub state: AppState,
    pub socket: AdminSocket,
}

impl Harness {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let registry = Arc::new(MetricRegistry::new());
        let state = AppState::new(Arc::clone(&registry)).unwrap();
        let socket = AdminSocket::new(state.clone());
        Self {
            dir,
            registry,
            state,
            socket,
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Bind at `name` inside the temp dir and return the socket path.
    pub async fn bind(&self, name: &str) -> PathBuf {
        let path = self.path(name);
        self.socket
            .apply_changes(&AdminSection::with_path(&path))
            .await
            .expect("bind admin socket");
        path
    }
}
