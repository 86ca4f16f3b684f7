//! The command parser.
//!
//! Tries each declared usage in order against the tokenized message and
//! returns the first one that consumes every argument token.

use std::collections::VecDeque;
use std::fmt;

use crate::action::Action;
use crate::error::{CoercionError, ParseError, ParsingError};
use crate::namespace::Namespace;
use crate::token::Token;
use crate::tokenizer::{Message, Tokenizer};
use crate::usage::Usage;

/// Parses chat messages into typed argument namespaces for one command.
///
/// A parser owns one or more usages; the first declared usage is the default
/// one reported in help text. It is constructed once at startup with an
/// implicit empty usage, populated during command registration, and
/// immutable afterwards, so concurrent parse calls can share it freely.
#[derive(Debug)]
pub struct CommandParser<V, C> {
    name: String,
    usages: Vec<Usage<V, C>>,
}

impl<V, C> CommandParser<V, C> {
    /// Creates a parser with one empty default usage.
    ///
    /// The name is the command name used in error messages.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            usages: vec![Usage::new()],
        }
    }

    /// The command name this parser serves.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared usages, default first.
    #[must_use]
    pub fn usages(&self) -> &[Usage<V, C>] {
        &self.usages
    }

    /// The default usage added in the constructor.
    #[must_use]
    pub fn default_usage(&self) -> &Usage<V, C> {
        &self.usages[0]
    }

    /// Appends an argument slot to the default usage.
    ///
    /// # Panics
    ///
    /// Panics on a duplicate destination key; see [`Usage::add_argument`].
    pub fn add_argument(&mut self, action: Action<V, C>) -> &mut Self {
        self.usages[0].add_argument(action);
        self
    }

    /// Opens a new alternative usage and returns it for population.
    pub fn new_usage(&mut self) -> &mut Usage<V, C> {
        self.usages.push(Usage::new());
        let last = self.usages.len() - 1;
        &mut self.usages[last]
    }
}

impl<V, C> CommandParser<V, C>
where
    V: Clone + PartialEq + fmt::Display,
    C: Sync,
{
    /// Parses a message into a namespace.
    ///
    /// The message is tokenized (mentions kept atomic) and the leading
    /// command-name token is dropped before the usages are tried.
    ///
    /// # Errors
    ///
    /// [`ParseError::Tokenize`] on corrupt markup, [`ParseError::Rejected`]
    /// when every declared usage turns the arguments down.
    pub async fn parse(&self, message: &Message, ctx: &C) -> Result<Namespace<V>, ParseError> {
        let mut tokens = Tokenizer::tokenize(message)?;
        if !tokens.is_empty() {
            tokens.remove(0);
        }
        self.parse_arguments(tokens, ctx).await.map_err(ParseError::from)
    }

    /// Parses an already-tokenized argument list (command name removed).
    ///
    /// Usages are tried in declaration order; the first whose arity bounds
    /// fit and whose slots all succeed wins, even if a later usage would
    /// also have matched.
    ///
    /// # Errors
    ///
    /// One [`ParsingError`] combining, per usage, its syntax string and the
    /// specific reason it was rejected.
    pub async fn parse_arguments(
        &self,
        tokens: Vec<Token>,
        ctx: &C,
    ) -> Result<Namespace<V>, ParsingError> {
        let mut failures = Vec::with_capacity(self.usages.len());

        for usage in &self.usages {
            // Cheap rejection on arity bounds, without running any coercion.
            let minimum = usage.min_arguments();
            if tokens.len() < minimum {
                failures.push(format!(
                    "requires at least {minimum} argument{}.",
                    plural_s(minimum)
                ));
                continue;
            }
            if let Some(maximum) = usage.max_arguments() {
                if tokens.len() > maximum {
                    failures.push(format!(
                        "allows at most {maximum} argument{}.",
                        plural_s(maximum)
                    ));
                    continue;
                }
            }

            match try_usage(usage, &tokens, ctx).await {
                Ok(namespace) => return Ok(namespace),
                Err(reason) => failures.push(reason),
            }
        }

        Err(self.rejection(&failures))
    }

    /// Combines per-usage failure reasons into one aggregated error.
    fn rejection(&self, failures: &[String]) -> ParsingError {
        let mut message = String::new();
        for (usage, failure) in self.usages.iter().zip(failures) {
            let syntax = usage.syntax();
            if !message.is_empty() {
                message.push('\n');
            }
            if syntax.is_empty() {
                message.push_str(&format!("`!{}` {failure}", self.name));
            } else {
                message.push_str(&format!("`!{} {syntax}` {failure}", self.name));
            }
        }
        ParsingError::new(message)
    }
}

/// Runs every slot of one usage against a private copy of the tokens.
///
/// Fails with a rendered reason when a slot stays under its minimum arity or
/// tokens are left over after the last slot.
async fn try_usage<V, C>(
    usage: &Usage<V, C>,
    tokens: &[Token],
    ctx: &C,
) -> Result<Namespace<V>, String>
where
    V: Clone + PartialEq + fmt::Display,
    C: Sync,
{
    // Populate the namespace with the declared defaults up front.
    let mut namespace = Namespace::new();
    for action in usage.actions() {
        if let Some(default) = action.default() {
            namespace.set_single(action.dest(), default.clone());
        }
    }

    let mut remaining: VecDeque<Token> = tokens.iter().cloned().collect();

    for action in usage.actions() {
        let outcome = consume_action(action, remaining, ctx).await;
        remaining = outcome.remaining;

        if outcome.values.len() < action.arity().min() {
            return Err(match outcome.failure {
                Some(err) => err.to_string(),
                None => {
                    let missing = action.arity().min() - outcome.values.len();
                    format!("Missing argument{}", plural_s(missing))
                }
            });
        }

        if action.arity().binds_single() {
            // Zero matches on an optional slot leaves the default standing.
            if let Some(value) = outcome.values.into_iter().next() {
                namespace.set_single(action.dest(), value);
            }
        } else {
            namespace.set_seq(action.dest(), outcome.values);
        }
    }

    if !remaining.is_empty() {
        let extra: Vec<String> = remaining.iter().map(ToString::to_string).collect();
        return Err(format!(
            "Unrecognized argument{}: {}",
            plural_s(extra.len()),
            extra.join(", ")
        ));
    }

    Ok(namespace)
}

/// What consuming tokens for one slot produced.
struct Consumption<V> {
    values: Vec<V>,
    remaining: VecDeque<Token>,
    failure: Option<CoercionError>,
}

/// Greedily consumes tokens for one slot.
///
/// Pops tokens while they coerce and the arity allows more. The first
/// rejected token is pushed back onto the front of the sequence so later
/// slots (or the unrecognized-arguments check) still see it; its failure
/// reason is remembered for error reporting. State threads through the
/// return value; nothing outside the loop is mutated.
async fn consume_action<V, C>(
    action: &Action<V, C>,
    mut remaining: VecDeque<Token>,
    ctx: &C,
) -> Consumption<V>
where
    V: Clone + PartialEq + fmt::Display,
    C: Sync,
{
    let mut values = Vec::new();
    let mut failure = None;

    while let Some(token) = remaining.pop_front() {
        let coerced = match action.coercer().coerce(&token, ctx).await {
            Ok(value) => check_choice(action, value),
            Err(err) => Err(err),
        };

        match coerced {
            Ok(value) => {
                values.push(value);
                if action.arity().max().is_some_and(|max| values.len() >= max) {
                    break;
                }
            }
            Err(err) => {
                remaining.push_front(token);
                failure = Some(err);
                break;
            }
        }
    }

    Consumption {
        values,
        remaining,
        failure,
    }
}

/// Validates a coerced value against the slot's choice set, if declared.
///
/// A value outside the set is a coercion failure, not a separate error
/// class, so it drives the same push-back behavior.
fn check_choice<V, C>(action: &Action<V, C>, value: V) -> Result<V, CoercionError>
where
    V: PartialEq + fmt::Display,
{
    match action.choices() {
        Some(choices) if !choices.contains(&value) => {
            let listed = choices
                .iter()
                .map(|choice| format!("`{choice}`"))
                .collect::<Vec<_>>()
                .join(", ");
            Err(CoercionError::new(format!(
                "{value} is not an available choice, choose from {listed}"
            )))
        }
        _ => Ok(value),
    }
}

fn plural_s(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
