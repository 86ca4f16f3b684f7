//! The `start` command.

use async_trait::async_trait;

use tallybot_parsing::{Action, Arity, CommandParser, Namespace};

use crate::arg::Arg;
use crate::base::{Command, CommandError};
use crate::coercers;
use crate::context::CommandContext;
use crate::event::ChatEvent;

/// Registers the sender with the bot.
pub struct StartCommand {
    parser: CommandParser<Arg, CommandContext>,
}

impl StartCommand {
    /// Creates the command and its parser.
    ///
    /// Two usages: `start new [username]` creates a fresh account,
    /// `start existing <alias>` links an account from another application.
    #[must_use]
    pub fn new() -> Self {
        let mut parser = CommandParser::new("start");
        parser
            .add_argument(
                Action::new("new", coercers::lowercase())
                    .with_choices(vec![Arg::Str("new".to_string())]),
            )
            .add_argument(
                Action::new("username", coercers::string()).with_arity(Arity::Optional),
            );
        parser
            .new_usage()
            .add_argument(
                Action::new("existing", coercers::lowercase())
                    .with_choices(vec![Arg::Str("existing".to_string())]),
            )
            .add_argument(
                Action::new("alias", coercers::string()).with_arity(Arity::Exactly(1)),
            );
        Self { parser }
    }
}

impl Default for StartCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for StartCommand {
    fn name(&self) -> &str {
        "start"
    }

    fn description(&self) -> &str {
        "Use this command once per user to start interacting with this \
         bot.<br/>\
         This command creates your user account in case you haven't used \
         the bot before. Use <code>start new [username]</code> to create a \
         fresh user account with zero balance and no permissions, using the \
         given optional username (setting a username is highly \
         recommended). If you used the bot in some other application \
         before, use <code>start existing &lt;alias&gt;</code> instead, \
         with the alias copied from the other application.<br/>\
         Use <code>help</code> for more information about how to use this \
         bot and its commands."
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
        if args.contains("existing") {
            return Ok(
                "Linking an account from another application is not available \
                 here yet. Ask an administrator to connect your accounts."
                    .to_string(),
            );
        }

        let username = args.single("username").and_then(Arg::as_str);
        let user = ctx.api.create_user(&event.sender, username).await?;
        Ok(format!(
            "Welcome {}! Your account has been created. Use <code>help</code> \
             to see what this bot can do for you.",
            user.display_name()
        ))
    }
}
