use async_trait::async_trait;
use serde_json::json;

use proflog_core::error::Result;

use crate::dispatch::{AdminCommand, CommandCtx};

pub struct VersionCommand;

#[async_trait]
impl AdminCommand for VersionCommand {
    fn name(&self) -> &'static str {
        "version"
    }

    async fn execute(&self, _ctx: &CommandCtx, _args: &str) -> Result<String> {
        Ok(json!({ "version": env!("CARGO_PKG_VERSION") }).to_string())
    }
}
