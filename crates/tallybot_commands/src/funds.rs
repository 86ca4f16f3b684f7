//! The `funds` command.

use async_trait::async_trait;

use tallybot_api::{PermissionLevel, ensure_permissions};
use tallybot_parsing::{CommandParser, Namespace};

use crate::arg::Arg;
use crate::base::{Command, CommandError};
use crate::context::CommandContext;
use crate::event::ChatEvent;
use crate::format::format_amount;

/// Reports the central community funds.
pub struct FundsCommand {
    parser: CommandParser<Arg, CommandContext>,
}

impl FundsCommand {
    /// Creates the command; it takes no arguments.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: CommandParser::new("funds"),
        }
    }
}

impl Default for FundsCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for FundsCommand {
    fn name(&self) -> &str {
        "funds"
    }

    fn description(&self) -> &str {
        "Use this command to show the central funds.<br/>\
         This command can only be used by internal users."
    }

    fn parser(&self) -> &CommandParser<Arg, CommandContext> {
        &self.parser
    }

    async fn run(
        &self,
        _args: &Namespace<Arg>,
        ctx: &CommandContext,
        event: &ChatEvent,
    ) -> Result<String, CommandError> {
        let sender = ctx.api.get_user_by_alias(&event.sender).await?;
        if let Err(refusal) = ensure_permissions(&sender, PermissionLevel::AnyInternal, "funds") {
            return Ok(refusal);
        }

        let total = ctx.api.get_community_user().await?.balance;
        if total >= 0 {
            Ok(format!(
                "The community fund currently holds {}",
                format_amount(total)
            ))
        } else {
            Ok(format!(
                "The community fund is {} in debt",
                format_amount(-total)
            ))
        }
    }
}
