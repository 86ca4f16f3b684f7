//! Alternative argument grammars.
//!
//! A usage is one complete grammar for a command. Commands that accept
//! several mutually exclusive argument shapes declare one usage per shape;
//! the parser tries them in declaration order.

use std::fmt;

use crate::action::Action;

/// One complete alternative argument grammar for a command.
///
/// Value object: populated at command-registration time via
/// [`Usage::add_argument`] and read-only once the parser starts serving
/// requests.
#[derive(Debug)]
pub struct Usage<V, C> {
    actions: Vec<Action<V, C>>,
}

impl<V, C> Default for Usage<V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C> Usage<V, C> {
    /// Creates an empty usage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Appends an argument slot.
    ///
    /// Returns `&mut Self` so registration reads as a chain.
    ///
    /// # Panics
    ///
    /// Panics when the slot's destination key is already taken within this
    /// usage. Duplicate destinations are a programming error caught at
    /// command-registration time, never at message-handling time.
    pub fn add_argument(&mut self, action: Action<V, C>) -> &mut Self {
        assert!(
            self.actions.iter().all(|a| a.dest() != action.dest()),
            "duplicate destination key `{}`",
            action.dest()
        );
        self.actions.push(action);
        self
    }

    /// The declared slots, in consumption order.
    #[must_use]
    pub fn actions(&self) -> &[Action<V, C>] {
        &self.actions
    }

    /// Fewest tokens this usage can accept.
    #[must_use]
    pub fn min_arguments(&self) -> usize {
        self.actions.iter().map(|a| a.arity().min()).sum()
    }

    /// Most tokens this usage can accept; `None` is unbounded.
    #[must_use]
    pub fn max_arguments(&self) -> Option<usize> {
        self.actions
            .iter()
            .try_fold(0usize, |total, a| Some(total + a.arity().max()?))
    }

    /// Rendered syntax string, e.g. `<amount> <receiver> [<reason> ...]`.
    #[must_use]
    pub fn syntax(&self) -> String {
        self.actions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<V, C> fmt::Display for Usage<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.syntax())
    }
}
