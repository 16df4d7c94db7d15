use async_trait::async_trait;

use proflog_core::error::{ProflogError, Result};

use crate::dispatch::{AdminCommand, CommandCtx};

/// Describe every counter's type, in dump order.
pub struct SchemaCommand;

#[async_trait]
impl AdminCommand for SchemaCommand {
    fn name(&self) -> &'static str {
        "schema"
    }

    async fn execute(&self, ctx: &CommandCtx, args: &str) -> Result<String> {
        if !args.is_empty() {
            return Err(ProflogError::BadRequest("schema takes no arguments".into()));
        }
        Ok(ctx.registry().schema())
    }
}
