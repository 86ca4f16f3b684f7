//! The `balance` command.

use async_trait::async_trait;

use tallybot_parsing::{Action, Arity, CommandParser, Namespace};

use crate::arg::Arg;
use crate::base::{Command, CommandError};
use crate::coercers;
use crate::context::CommandContext;
use crate::event::ChatEvent;
use crate::format::format_amount;

/// Shows a user's wallet balance.
pub struct BalanceCommand {
    parser: CommandParser<Arg, CommandContext>,
}

impl BalanceCommand {
    /// Creates the command and its parser.
    #[must_use]
    pub fn new() -> Self {
        let mut parser = CommandParser::new("balance");
        parser.add_argument(Action::new("user", coercers::user()).with_arity(Arity::Optional));
        Self { parser }
    }
}

impl Default for BalanceCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for BalanceCommand {
    fn name(&self) -> &str {
        "balance"
    }

    fn description(&self) -> &str {
        "Use this command to show a user's balance.<br/>\
         When you use this command without arguments, the bot will reply \
         with the current amount of money stored in your virtual wallet. \
         If you specify a username or mention someone as an argument, the \
         balance of this user is returned instead of yours."
    }

    fn parser(&self) -> &CommandParser<Arg, CommandContext> {
        &self.parser
    }

    async fn run(
        &self,
        args: &Namespace<Arg>,
        ctx: &CommandContext,
        event: &ChatEvent,
    ) -> Result<String, CommandError> {
        if let Some(user) = args.single("user").and_then(Arg::as_user) {
            return Ok(format!(
                "Balance of {} is: {}",
                user.display_name(),
                format_amount(user.balance)
            ));
        }

        let user = ctx.api.get_user_by_alias(&event.sender).await?;
        Ok(format!("Your balance is: {}", format_amount(user.balance)))
    }
}
