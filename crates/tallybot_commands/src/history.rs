//! The `history` command.

use async_trait::async_trait;

use tallybot_api::{Transaction, User};
use tallybot_parsing::{Action, Arity, CommandParser, Namespace};

use crate::arg::Arg;
use crate::base::{Command, CommandError};
use crate::coercers;
use crate::context::CommandContext;
use crate::event::ChatEvent;

/// Reports or exports a user's transaction log.
pub struct HistoryCommand {
    parser: CommandParser<Arg, CommandContext>,
}

impl HistoryCommand {
    /// Creates the command and its parser.
    ///
    /// Two usages: a recent-N report (`history [length]`) and an export
    /// (`history json|csv`). The export usage only wins when the report
    /// usage's numeric coercer rejects the token.
    #[must_use]
    pub fn new() -> Self {
        let mut parser = CommandParser::new("history");
        parser.add_argument(
            Action::new("length", coercers::natural())
                .with_arity(Arity::Optional)
                .with_default(Arg::Natural(10)),
        );
        parser.new_usage().add_argument(
            Action::new("export", coercers::lowercase())
                .with_arity(Arity::Optional)
                .with_choices(vec![
                    Arg::Str("json".to_string()),
                    Arg::Str("csv".to_string()),
                ]),
        );
        Self { parser }
    }

    async fn report(
        &self,
        args: &Namespace<Arg>,
        ctx: &CommandContext,
        event: &ChatEvent,
    ) -> Result<String, CommandError> {
        let user = ctx.api.get_user_by_alias(&event.sender).await?;
        let length = args
            .single("length")
            .and_then(Arg::as_natural)
            .unwrap_or(10) as usize;

        let transactions = ctx.api.get_transactions_of_user(&user).await?;
        let logs: Vec<String> = transactions
            .iter()
            .map(|t| format_transaction(t, &user))
            .collect();
        let logs = &logs[logs.len().saturating_sub(length)..];

        if logs.is_empty() {
            return Ok("You don't have any registered transactions yet.".to_string());
        }
        if logs.len() > 10 && !event.room.is_private() {
            return Ok(
                "Your requested transaction logs are too long. Try a smaller number of \
                 entries or execute this command in private chat again."
                    .to_string(),
            );
        }

        Ok(format!(
            "<i>Transaction history for {}</i>:<br/>\n<pre>\n{}\n</pre>\n",
            user.display_name(),
            logs.join("\n")
        ))
    }

    async fn export(
        &self,
        format: &str,
        ctx: &CommandContext,
        event: &ChatEvent,
    ) -> Result<String, CommandError> {
        if !event.room.is_private() {
            return Ok("This command can only be used in private chat.".to_string());
        }

        let user = ctx.api.get_user_by_alias(&event.sender).await?;
        let transactions = ctx.api.get_transactions_of_user(&user).await?;
        if transactions.is_empty() {
            return Ok("You don't have any registered transactions yet.".to_string());
        }

        if format == "csv" {
            return Ok("Exporting to CSV is currently not implemented.".to_string());
        }

        let text = serde_json::to_string_pretty(&transactions)
            .map_err(|err| CommandError::Internal(format!("export serialization: {err}")))?;
        Ok(format!("<pre>\n{text}\n</pre>"))
    }
}

impl Default for HistoryCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// One plain-text report line for a transaction, from the user's point of
/// view.
fn format_transaction(transaction: &Transaction, user: &User) -> String {
    let outgoing = transaction.sender.id == user.id;
    let direction = if outgoing { ">>" } else { "<<" };
    let partner = if outgoing {
        transaction.receiver.display_name()
    } else {
        transaction.sender.display_name()
    };
    let mut amount = transaction.amount as f64 / 100.0;
    if outgoing {
        amount = -amount;
    }
    let timestamp = transaction.timestamp.format("%d.%m.%Y %H:%M");
    let reason = transaction.reason.as_deref().unwrap_or("");
    format!("{timestamp}: {amount:>+7.2}: me {direction} {partner:<16} :: {reason}")
}

#[async_trait]
impl Command for HistoryCommand {
    fn name(&self) -> &str {
        "history"
    }

    fn description(&self) -> &str {
        "Use this command to get an overview of your transactions.<br/>\
         You can specify the number of most recent transactions (by default \
         <code>10</code>) which will be returned by the bot. Using a huge \
         number will just print all your transactions.<br/>\
         You may also export the whole history of your personal transactions. \
         Currently supported formats are <code>csv</code> and \
         <code>json</code>. Just add one of those two format specifiers \
         after the command. Note that this variant is restricted to your \
         personal chat with the bot."
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
        match args.single("export").and_then(Arg::as_str) {
            Some(format) => self.export(format, ctx, event).await,
            None => self.report(args, ctx, event).await,
        }
    }
}
