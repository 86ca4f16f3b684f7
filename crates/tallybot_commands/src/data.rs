//! The `data` command.

use async_trait::async_trait;

use tallybot_parsing::{CommandParser, Namespace};

use crate::arg::Arg;
use crate::base::{Command, CommandError};
use crate::context::CommandContext;
use crate::event::ChatEvent;
use crate::format::{format_amount, plural_s};

/// Shows everything the bot has stored about the sender.
pub struct DataCommand {
    parser: CommandParser<Arg, CommandContext>,
}

impl DataCommand {
    /// Creates the command; it takes no arguments.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: CommandParser::new("data"),
        }
    }
}

impl Default for DataCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for DataCommand {
    fn name(&self) -> &str {
        "data"
    }

    fn description(&self) -> &str {
        "Use this command to get an overview of the data the bot has stored \
         about you.<br/>\
         This command can only be used in private chat to protect private \
         data. To view your transactions, use the command \
         <code>history</code> instead."
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
        if !event.room.is_private() {
            return Ok("This command can only be used in private chat.".to_string());
        }

        let user = ctx.api.get_user_by_alias(&event.sender).await?;

        let relations = if user.external {
            match user.voucher_id {
                Some(id) => {
                    let voucher = ctx.api.get_user_by_id(id).await?;
                    format!("Voucher user: {}", voucher.display_name())
                }
                None => "Voucher user: None".to_string(),
            }
        } else {
            let debtors: Vec<String> = ctx
                .api
                .get_users()
                .await?
                .iter()
                .filter(|other| other.voucher_id == Some(user.id))
                .map(|other| other.display_name())
                .collect();
            let listed = if debtors.is_empty() {
                "None".to_string()
            } else {
                debtors.join(", ")
            };
            format!("Debtor user{}: {listed}", plural_s(debtors.len()))
        };

        let aliases: Vec<&str> = user
            .aliases
            .iter()
            .map(|alias| alias.app_username.as_str())
            .collect();

        Ok(format!(
            "<i>Overview over currently stored data for {}</i>:<br/><br/>\n<pre>\n\
             User ID: {}\n\
             Chat handle: {}\n\
             This room: {}\n\
             Username: {}\n\
             Balance: {}\n\
             Vote permissions: {}\n\
             External user: {}\n\
             {relations}\n\
             Account created: {}\n\
             Last transaction: {}\n\
             App aliases: {}\n\
             </pre>\n\nUse the <code>history</code> command to see your transaction log.",
            user.display_name(),
            user.id,
            event.sender,
            event.room.id,
            user.name.as_deref().unwrap_or("None"),
            format_amount(user.balance),
            user.permission,
            user.external,
            user.created.format("%d.%m.%Y %H:%M"),
            user.accessed.format("%d.%m.%Y %H:%M"),
            aliases.join(", "),
        ))
    }
}
