//! The command trait and command-level errors.

use async_trait::async_trait;
use thiserror::Error;

use tallybot_api::ApiError;
use tallybot_parsing::{CommandParser, Namespace};

use crate::arg::Arg;
use crate::context::CommandContext;
use crate::event::ChatEvent;

/// A failure while executing an already-parsed command.
///
/// Argument problems never reach this type; they are [`ParsingError`]s
/// raised before `run` is called.
///
/// [`ParsingError`]: tallybot_parsing::ParsingError
#[derive(Debug, Error)]
pub enum CommandError {
    /// The ledger service call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A handler reached a state its parser should have made impossible.
    #[error("internal command error: {0}")]
    Internal(String),
}

/// One chat command.
///
/// Implementations build their argument parser once in their constructor and
/// keep it immutable afterwards. `run` receives the parsed namespace and
/// returns the reply as formatted (HTML) text; the dispatch layer owns
/// parsing, error rendering, and the transport.
#[async_trait]
pub trait Command: Send + Sync {
    /// The command name, without the command prefix.
    fn name(&self) -> &str;

    /// Formatted multi-line description shown by the help command.
    fn description(&self) -> &str;

    /// The argument parser for this command.
    fn parser(&self) -> &CommandParser<Arg, CommandContext>;

    /// Executes the command and produces the reply text.
    async fn run(
        &self,
        args: &Namespace<Arg>,
        ctx: &CommandContext,
        event: &ChatEvent,
    ) -> Result<String, CommandError>;
}
