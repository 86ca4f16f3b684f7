//! The parsed argument value type.

use std::fmt;

use tallybot_api::{Consumable, User};

use crate::format::format_amount;

/// One coerced argument value.
///
/// This is the `V` of the parsing engine for every Tallybot command.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    /// A plain string argument.
    Str(String),
    /// A natural number.
    Natural(u32),
    /// An amount of money in minor currency units.
    Amount(i64),
    /// A resolved user account.
    User(User),
    /// The name of a registered command.
    Command(String),
    /// A resolved consumable good.
    Consumable(Consumable),
}

impl Arg {
    /// The string value, if this is a plain string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// The natural number, if this is one.
    #[must_use]
    pub fn as_natural(&self) -> Option<u32> {
        match self {
            Self::Natural(value) => Some(*value),
            _ => None,
        }
    }

    /// The amount in minor units, if this is one.
    #[must_use]
    pub fn as_amount(&self) -> Option<i64> {
        match self {
            Self::Amount(value) => Some(*value),
            _ => None,
        }
    }

    /// The user, if this is a resolved user.
    #[must_use]
    pub fn as_user(&self) -> Option<&User> {
        match self {
            Self::User(user) => Some(user),
            _ => None,
        }
    }

    /// The command name, if this is a resolved command.
    #[must_use]
    pub fn as_command(&self) -> Option<&str> {
        match self {
            Self::Command(name) => Some(name),
            _ => None,
        }
    }

    /// The consumable, if this is a resolved consumable.
    #[must_use]
    pub fn as_consumable(&self) -> Option<&Consumable> {
        match self {
            Self::Consumable(consumable) => Some(consumable),
            _ => None,
        }
    }
}

impl fmt::Display for Arg {
    /// Renders the value the way error messages show it to users.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.write_str(value),
            Self::Natural(value) => write!(f, "{value}"),
            Self::Amount(value) => f.write_str(&format_amount(*value)),
            Self::User(user) => f.write_str(&user.display_name()),
            Self::Command(name) => f.write_str(name),
            Self::Consumable(consumable) => f.write_str(&consumable.name),
        }
    }
}
