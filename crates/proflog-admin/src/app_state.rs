//! Shared application state for the admin socket.
//!
//! Wires the injected metric registry to the command dispatcher and the
//! server's own metrics. There is no process-global registry: whoever builds
//! the `AppState` decides which registry the socket serves.

use std::sync::Arc;

use proflog_core::error::Result;
use proflog_core::MetricRegistry;

use crate::commands::{SchemaCommand, VersionCommand};
use crate::dispatch::{CommandCtx, Dispatcher};
use crate::obs::AdminMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    registry: Arc<MetricRegistry>,
    dispatcher: Dispatcher,
    metrics: AdminMetrics,
}

impl AppState {
    /// Build application state with the built-in commands registered.
    pub fn new(registry: Arc<MetricRegistry>) -> Result<Self> {
        let dispatcher = Dispatcher::new();
        dispatcher.register(Arc::new(SchemaCommand));
        dispatcher.register(Arc::new(VersionCommand));

        let metrics = AdminMetrics::new()?;

        tracing::debug!(commands = ?dispatcher.registered_commands(), "admin commands registered");

        Ok(Self {
            inner: Arc::new(AppStateInner {
                registry,
                dispatcher,
                metrics,
            }),
        })
    }

    pub fn registry(&self) -> Arc<MetricRegistry> {
        Arc::clone(&self.inner.registry)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    pub fn metrics(&self) -> &AdminMetrics {
        &self.inner.metrics
    }

    pub fn command_ctx(&self) -> CommandCtx {
        CommandCtx::new(self.registry())
    }
}
