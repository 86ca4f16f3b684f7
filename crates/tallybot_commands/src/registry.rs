//! The command registry.
//!
//! A read-only lookup table from command name to executor, built once at
//! startup and shared behind an `Arc`. Coercers reach it through the
//! command context rather than any global state.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::balance::BalanceCommand;
use crate::base::Command;
use crate::blame::BlameCommand;
use crate::consume::ConsumeCommand;
use crate::data::DataCommand;
use crate::funds::FundsCommand;
use crate::help::HelpCommand;
use crate::history::HistoryCommand;
use crate::send::SendCommand;
use crate::start::StartCommand;

/// All registered command executors, keyed by name.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in command.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(BalanceCommand::new()));
        registry.register(Arc::new(BlameCommand::new()));
        registry.register(Arc::new(ConsumeCommand::new()));
        registry.register(Arc::new(DataCommand::new()));
        registry.register(Arc::new(FundsCommand::new()));
        registry.register(Arc::new(HelpCommand::new()));
        registry.register(Arc::new(HistoryCommand::new()));
        registry.register(Arc::new(SendCommand::new()));
        registry.register(Arc::new(StartCommand::new()));
        registry
    }

    /// Registers one command under its name.
    ///
    /// # Panics
    ///
    /// Panics when the name is already taken; duplicate command names are a
    /// programming error caught at startup.
    pub fn register(&mut self, command: Arc<dyn Command>) {
        let name = command.name().to_string();
        let previous = self.commands.insert(name.clone(), command);
        assert!(previous.is_none(), "duplicate command name `{name}`");
    }

    /// Looks up a command by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Command>> {
        self.commands.get(name)
    }

    /// Iterates the commands in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Command>> {
        self.commands.values()
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
