//! The `help` command.

use async_trait::async_trait;

use tallybot_parsing::{Action, Arity, CommandParser, Namespace};

use crate::arg::Arg;
use crate::base::{Command, CommandError};
use crate::coercers;
use crate::context::CommandContext;
use crate::event::ChatEvent;

/// Prints the help page for one command or the global command list.
pub struct HelpCommand {
    parser: CommandParser<Arg, CommandContext>,
}

impl HelpCommand {
    /// Creates the command and its parser.
    #[must_use]
    pub fn new() -> Self {
        let mut parser = CommandParser::new("help");
        parser
            .add_argument(
                Action::new("command", coercers::command()).with_arity(Arity::Optional),
            )
            .add_argument(Action::new("catchall", coercers::string()).with_arity(Arity::Many));
        Self { parser }
    }
}

impl Default for HelpCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// The help page for one specific command.
fn command_page(command: &dyn Command) -> String {
    let usages = command
        .parser()
        .usages()
        .iter()
        .map(|usage| {
            let syntax = usage.syntax();
            if syntax.is_empty() {
                format!("<code>!{}</code>", command.name())
            } else {
                format!("<code>!{} {syntax}</code>", command.name())
            }
        })
        .collect::<Vec<_>>()
        .join("<br/>");
    format!(
        "Help on command <b>{}</b><br/><br/><em>Usages:</em><br/>{usages}\
         <br/><br/><em>Description:</em><br/>{}<br/>",
        command.name(),
        command.description()
    )
}

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn description(&self) -> &str {
        "The <code>help</code> command prints the help page for any \
         command. If no argument is passed, it will print its usage and a \
         list of all available commands."
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
        if let Some(name) = args.single("command").and_then(Arg::as_command) {
            let command = ctx.registry.get(name).ok_or_else(|| {
                CommandError::Internal(format!("coerced unknown command {name}"))
            })?;
            return Ok(command_page(command.as_ref()));
        }

        let listing: String = ctx
            .registry
            .iter()
            .map(|command| {
                let syntax = command.parser().default_usage().syntax();
                let shown = if syntax.is_empty() {
                    format!("!{}", command.name())
                } else {
                    format!("!{} {syntax}", command.name())
                };
                format!(
                    "<li><b>{}</b>:<br/><code>{shown}</code><br/>{}</li>",
                    command.name(),
                    command.description()
                )
            })
            .collect();

        let mut message = format!(
            "Tallybot keeps track of shared drinks and money.<br/><br/>\
             <em>List of commands:</em><br/><ul>{listing}</ul>"
        );

        match ctx.api.get_user_by_alias(&event.sender).await {
            Ok(user) => {
                if user.external {
                    message.push_str(
                        "<br/>You are an external user. Some commands may be restricted.",
                    );
                    if user.voucher_id.is_none() {
                        message.push_str(
                            "<br/>You don't have any voucher. Your possible interactions \
                             with the bot are very limited for security purposes. You can \
                             ask some internal user to vouch for you.",
                        );
                    }
                }
            }
            Err(tallybot_api::ApiError::User(_)) => {
                message.push_str(
                    "<br/><b>You are currently not registered.</b><br/>Please see the \
                     help page of the <code>start</code> command to see how you register \
                     yourself.",
                );
            }
            Err(err) => return Err(err.into()),
        }

        Ok(message)
    }
}
