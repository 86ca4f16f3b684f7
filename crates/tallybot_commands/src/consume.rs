//! The `consume` command.

use async_trait::async_trait;

use tallybot_api::Consumable;
use tallybot_parsing::{Action, Arity, CommandParser, Namespace};

use crate::arg::Arg;
use crate::base::{Command, CommandError};
use crate::coercers;
use crate::context::CommandContext;
use crate::event::ChatEvent;
use crate::format::format_amount;

/// Books the consumption of stocked goods.
pub struct ConsumeCommand {
    parser: CommandParser<Arg, CommandContext>,
}

impl ConsumeCommand {
    /// Creates the command and its parser.
    #[must_use]
    pub fn new() -> Self {
        let mut parser = CommandParser::new("consume");
        parser
            .add_argument(Action::new("consumable", coercers::consumable()))
            .add_argument(
                Action::new("number", coercers::natural())
                    .with_arity(Arity::Optional)
                    .with_default(Arg::Natural(1)),
            );
        Self { parser }
    }
}

impl Default for ConsumeCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// One listing line for the wildcard reply.
fn listing_line(consumable: &Consumable) -> String {
    let base = format!(
        "<li>{} <b>{}</b> (price: {}, stock: {})",
        consumable.symbol,
        consumable.name,
        format_amount(consumable.price),
        consumable.stock
    );
    if consumable.description.is_empty() {
        format!("{base}</li>")
    } else {
        format!("{base}: {}</li>", consumable.description)
    }
}

#[async_trait]
impl Command for ConsumeCommand {
    fn name(&self) -> &str {
        "consume"
    }

    fn description(&self) -> &str {
        "Use this command to consume consumable goods.<br/>\
         The first argument <code>consumable</code> determines which good \
         you want to consume, while the optional second argument \
         <code>number</code> determines the number of consumed goods \
         (defaulting to a single one). Use the special consumable \
         <code>?</code> to get a list of the consumable goods currently \
         available."
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
        match args.single("consumable") {
            Some(Arg::Str(_)) => {
                let lines: String = ctx
                    .api
                    .get_consumables()
                    .await?
                    .iter()
                    .map(listing_line)
                    .collect();
                Ok(format!(
                    "The following consumables are currently available:<br/><ul>{lines}</ul>"
                ))
            }
            Some(Arg::Consumable(consumable)) => {
                let sender = ctx.api.get_user_by_alias(&event.sender).await?;
                let number = args
                    .single("number")
                    .and_then(Arg::as_natural)
                    .unwrap_or(1);

                let transaction = ctx.api.consume(consumable, number, &sender).await?;

                // The reply message rotates with the transaction id; no RNG
                // state is kept in the bot.
                let message = match consumable.messages.as_slice() {
                    [] => "Enjoy!",
                    messages => {
                        let idx = usize::try_from(transaction.id).unwrap_or(0) % messages.len();
                        &messages[idx]
                    }
                };
                Ok(format!(
                    "{message}{}",
                    consumable.symbol.repeat(number as usize)
                ))
            }
            other => Err(CommandError::Internal(format!(
                "invalid consumable argument: {other:?}"
            ))),
        }
    }
}
