//! Argument slots.
//!
//! An action describes one named argument: its coercer, how many tokens it
//! may consume, its default, and an optional closed set of allowed values.

use std::fmt;

use crate::coerce::Coercer;

/// How many tokens an argument slot may consume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one token.
    One,
    /// Zero or one token.
    Optional,
    /// Zero or more tokens.
    Many,
    /// Exactly this many tokens.
    Exactly(usize),
}

impl Arity {
    /// Fewest tokens the slot must consume.
    #[must_use]
    pub fn min(self) -> usize {
        match self {
            Self::One => 1,
            Self::Optional | Self::Many => 0,
            Self::Exactly(n) => n,
        }
    }

    /// Most tokens the slot may consume; `None` is unbounded.
    #[must_use]
    pub fn max(self) -> Option<usize> {
        match self {
            Self::One | Self::Optional => Some(1),
            Self::Many => None,
            Self::Exactly(n) => Some(n),
        }
    }

    /// Whether a matched value binds as a single value rather than a
    /// sequence.
    #[must_use]
    pub fn binds_single(self) -> bool {
        matches!(self, Self::One | Self::Optional)
    }
}

/// One named, typed argument slot within a usage.
///
/// Slots are evaluated strictly in declaration order and each consumes a
/// contiguous prefix of the tokens left over by the slots before it.
#[derive(Debug)]
pub struct Action<V, C> {
    dest: String,
    coercer: Coercer<V, C>,
    arity: Arity,
    default: Option<V>,
    choices: Option<Vec<V>>,
}

impl<V, C> Action<V, C> {
    /// Creates a slot that consumes exactly one token.
    #[must_use]
    pub fn new(dest: impl Into<String>, coercer: Coercer<V, C>) -> Self {
        Self {
            dest: dest.into(),
            coercer,
            arity: Arity::One,
            default: None,
            choices: None,
        }
    }

    /// Sets the arity policy.
    #[must_use]
    pub fn with_arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    /// Sets the value bound when the arity permits zero matches.
    #[must_use]
    pub fn with_default(mut self, default: V) -> Self {
        self.default = Some(default);
        self
    }

    /// Restricts the slot to a closed set of acceptable values.
    ///
    /// A coerced value outside the set counts as a coercion failure, not a
    /// separate error class.
    #[must_use]
    pub fn with_choices(mut self, choices: Vec<V>) -> Self {
        self.choices = Some(choices);
        self
    }

    /// The destination key this slot writes into the namespace.
    #[must_use]
    pub fn dest(&self) -> &str {
        &self.dest
    }

    /// The slot's coercer.
    #[must_use]
    pub fn coercer(&self) -> &Coercer<V, C> {
        &self.coercer
    }

    /// The slot's arity policy.
    #[must_use]
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// The declared default, if any.
    #[must_use]
    pub fn default(&self) -> Option<&V> {
        self.default.as_ref()
    }

    /// The declared choice set, if any.
    #[must_use]
    pub fn choices(&self) -> Option<&[V]> {
        self.choices.as_deref()
    }
}

impl<V, C> fmt::Display for Action<V, C> {
    /// Renders the slot for usage/help text: `<dest>` when required,
    /// bracketed when optional, with an ellipsis when repeatable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arity {
            Arity::One => write!(f, "<{}>", self.dest),
            Arity::Optional => write!(f, "[<{}>]", self.dest),
            Arity::Many => write!(f, "[<{}> ...]", self.dest),
            Arity::Exactly(n) => {
                for i in 0..n {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "<{}>", self.dest)?;
                }
                Ok(())
            }
        }
    }
}
