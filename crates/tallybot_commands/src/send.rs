//! The `send` command.

use async_trait::async_trait;

use tallybot_api::ApiError;
use tallybot_parsing::{Action, ArgValue, Arity, CommandParser, Namespace};

use crate::arg::Arg;
use crate::base::{Command, CommandError};
use crate::coercers;
use crate::context::CommandContext;
use crate::event::ChatEvent;
use crate::format::format_amount;

/// Transfers money to another user.
pub struct SendCommand {
    parser: CommandParser<Arg, CommandContext>,
}

impl SendCommand {
    /// Creates the command and its parser.
    #[must_use]
    pub fn new() -> Self {
        let mut parser = CommandParser::new("send");
        parser
            .add_argument(Action::new("amount", coercers::amount()))
            .add_argument(Action::new("receiver", coercers::user()))
            .add_argument(
                Action::new("reason", coercers::string())
                    .with_arity(Arity::Many)
                    .with_default(Arg::Str("<no description>".to_string())),
            );
        Self { parser }
    }
}

impl Default for SendCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the reason binding, which is the default single string when the
/// user typed no reason words and a sequence otherwise.
fn render_reason(binding: Option<&ArgValue<Arg>>) -> String {
    let text = match binding {
        Some(ArgValue::Single(arg)) => arg.to_string(),
        Some(ArgValue::Seq(args)) if !args.is_empty() => args
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" "),
        _ => "<no description>".to_string(),
    };
    format!("send: {text}")
}

#[async_trait]
impl Command for SendCommand {
    fn name(&self) -> &str {
        "send"
    }

    fn description(&self) -> &str {
        "Use this command to send money to another user.<br/>\
         The receiver of your transaction has to be registered with this \
         bot, too. <b>The bot won't ask for confirmation</b>, so be sure to \
         enter the right values.<br/>\
         The first and second argument, <code>amount</code> and \
         <code>receiver</code> respectively, are mandatory. But you can add \
         as many extra words as you want after those two arguments to \
         specify a description/reason for your transaction."
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
        let sender = ctx.api.get_user_by_alias(&event.sender).await?;
        let amount = args
            .single("amount")
            .and_then(Arg::as_amount)
            .ok_or_else(|| CommandError::Internal("send without an amount".to_string()))?;
        let receiver = args
            .single("receiver")
            .and_then(Arg::as_user)
            .ok_or_else(|| CommandError::Internal("send without a receiver".to_string()))?;
        let reason = render_reason(args.get("reason"));

        match ctx
            .api
            .make_transaction(&sender, receiver, amount, &reason)
            .await
        {
            Ok(transaction) => Ok(format!(
                "<i>Okay, you sent {} to {}</i>",
                format_amount(transaction.amount),
                receiver.display_name()
            )),
            Err(ApiError::User(message)) => {
                tracing::warn!(command = "send", %message, "transaction refused");
                Ok(format!(
                    "<b>Your request couldn't be processed. No money has been \
                     transferred</b>:<br/><i>{message}</i>"
                ))
            }
            Err(err) => Err(err.into()),
        }
    }
}
