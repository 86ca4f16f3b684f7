//! Message dispatch.
//!
//! Routes incoming chat events to their command executors and turns every
//! failure class into the right user-facing reply: parse rejections are
//! replied verbatim and not logged as warnings (expected user error), while
//! corrupt markup and service failures are logged as anomalies.

use std::sync::Arc;

use tallybot_api::{ApiError, SharedApiClient};
use tallybot_commands::{ChatEvent, CommandContext, CommandError, CommandRegistry};
use tallybot_parsing::ParseError;

/// Routes chat events to commands.
pub struct Dispatcher {
    api: SharedApiClient,
    registry: Arc<CommandRegistry>,
    prefix: String,
}

impl Dispatcher {
    /// Creates a dispatcher over the shared client and registry.
    #[must_use]
    pub fn new(
        api: SharedApiClient,
        registry: Arc<CommandRegistry>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            api,
            registry,
            prefix: prefix.into(),
        }
    }

    /// The configured command prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Handles one incoming event.
    ///
    /// Returns the reply text, or `None` when the message is not addressed
    /// to the bot at all.
    pub async fn handle(&self, event: &ChatEvent) -> Option<String> {
        let body = event.message.plain.trim();
        let rest = body.strip_prefix(&self.prefix)?;
        let name = rest.split_whitespace().next()?.to_lowercase();

        let Some(command) = self.registry.get(&name) else {
            tracing::debug!(command = %name, sender = %event.sender, "unrecognized command");
            return Some(format!(
                "Unknown command <code>{name}</code>. Use <code>{}help</code> for a list \
                 of all available commands.",
                self.prefix
            ));
        };

        tracing::debug!(command = %name, sender = %event.sender, "dispatching");
        let ctx = CommandContext::new(self.api.clone(), Arc::clone(&self.registry));

        let args = match command.parser().parse(&event.message, &ctx).await {
            Ok(args) => args,
            // Expected user error; the message already reads as an
            // explanation and is replied verbatim.
            Err(ParseError::Rejected(err)) => return Some(err.message),
            Err(ParseError::Tokenize(err)) => {
                tracing::warn!(sender = %event.sender, error = %err, "malformed message markup");
                return Some("Your message's formatting could not be processed.".to_string());
            }
        };

        match command.run(&args, &ctx, event).await {
            Ok(reply) => Some(reply),
            Err(CommandError::Api(ApiError::Connection(detail))) => {
                tracing::error!(command = %name, %detail, "ledger service unreachable");
                Some("<i>I'm having networking problems.</i>".to_string())
            }
            Err(CommandError::Api(ApiError::User(message))) => {
                tracing::debug!(command = %name, %message, "user-level refusal");
                Some(message)
            }
            Err(CommandError::Api(ApiError::Service { status, message })) => {
                tracing::warn!(command = %name, status, %message, "ledger service error");
                Some("The command couldn't be executed.".to_string())
            }
            Err(CommandError::Internal(detail)) => {
                tracing::error!(command = %name, %detail, "internal command error");
                Some("The command couldn't be executed.".to_string())
            }
        }
    }
}
