use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use proflog_core::error::{ProflogError, Result};
use proflog_core::MetricRegistry;

/// What a command gets to look at while it runs.
#[derive(Clone)]
pub struct CommandCtx {
    registry: Arc<MetricRegistry>,
}

impl CommandCtx {
    pub fn new(registry: Arc<MetricRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }
}

/// Named admin socket command. The request body's first word selects it;
/// the remainder is passed as `args`.
#[async_trait]
pub trait AdminCommand: Send + Sync {
    fn name(&self) -> &'static str;
    async fn execute(&self, ctx: &CommandCtx, args: &str) -> Result<String>;
}

/// Registry and dispatcher for admin commands.
///
/// The empty request is the dump and never reaches a registered command.
#[derive(Default)]
pub struct Dispatcher {
    commands: DashMap<&'static str, Arc<dyn AdminCommand>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            commands: DashMap::new(),
        }
    }

    pub fn register(&self, cmd: Arc<dyn AdminCommand>) {
        if self.commands.insert(cmd.name(), cmd).is_some() {
            tracing::warn!("admin command registered twice; last one wins");
        }
    }

    pub fn registered_commands(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.iter().map(|e| *e.key()).collect();
        names.sort_unstable();
        names
    }

    pub async fn dispatch(&self, ctx: &CommandCtx, body: &[u8]) -> Result<String> {
        let text = std::str::from_utf8(body)
            .map_err(|e| ProflogError::BadRequest(format!("request is not utf-8: {e}")))?
            .trim();
        if text.is_empty() {
            return Ok(ctx.registry().dump());
        }

        let (name, args) = match text.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim_start()),
            None => (text, ""),
        };
        let handler = self
            .commands
            .get(name)
            .ok_or_else(|| ProflogError::UnknownCommand(name.to_string()))?
            .value()
            .clone();
        handler.execute(ctx, args).await
    }
}
