//! The `blame` command.

use async_trait::async_trait;

use tallybot_api::{PermissionLevel, ensure_permissions};
use tallybot_parsing::{CommandParser, Namespace};

use crate::arg::Arg;
use crate::base::{Command, CommandError};
use crate::context::CommandContext;
use crate::event::ChatEvent;

/// Names the user(s) with the highest debts.
pub struct BlameCommand {
    parser: CommandParser<Arg, CommandContext>,
}

impl BlameCommand {
    /// Creates the command; it takes no arguments.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: CommandParser::new("blame"),
        }
    }
}

impl Default for BlameCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for BlameCommand {
    fn name(&self) -> &str {
        "blame"
    }

    fn description(&self) -> &str {
        "Use this command to show the user(s) with the highest debts.<br/>\
         Put the user(s) with the highest debts to the pillory and make \
         them settle their debts, e.g. by buying stuff like new bottle \
         crates. This command can only be executed by internal users."
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
        if let Err(refusal) = ensure_permissions(&sender, PermissionLevel::AnyInternal, "blame") {
            return Ok(refusal);
        }

        let users = ctx.api.get_users().await?;
        let min_balance = users.iter().map(|user| user.balance).min().unwrap_or(0);
        let debtors: Vec<_> = users
            .iter()
            .filter(|user| user.balance <= min_balance && user.balance < 0)
            .collect();

        Ok(match debtors.as_slice() {
            [] => "Good news! No one has to be blamed, all users have positive balances!"
                .to_string(),
            [debtor] => format!(
                "The user with the highest debt is:<br/>{}",
                debtor.display_name()
            ),
            many => format!(
                "The users with the highest debts are:<br/>{}",
                many.iter()
                    .map(|user| user.display_name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        })
    }
}
