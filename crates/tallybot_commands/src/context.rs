//! The side-channel handed to coercers and command handlers.

use std::sync::Arc;

use tallybot_api::SharedApiClient;

use crate::registry::CommandRegistry;

/// Everything a coercion or a command handler may need beyond its arguments.
///
/// Built per dispatched message from shared handles; cloning is cheap. The
/// registry reference makes the command-name coercer an explicit read-only
/// lookup instead of a global.
#[derive(Clone)]
pub struct CommandContext {
    /// Client for the ledger service.
    pub api: SharedApiClient,
    /// The registered commands, read-only.
    pub registry: Arc<CommandRegistry>,
}

impl CommandContext {
    /// Creates a context from shared handles.
    #[must_use]
    pub fn new(api: SharedApiClient, registry: Arc<CommandRegistry>) -> Self {
        Self { api, registry }
    }
}
