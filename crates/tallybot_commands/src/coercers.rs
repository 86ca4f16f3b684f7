//! Argument coercers for Tallybot commands.
//!
//! The pure coercers wrap their [`tallybot_parsing::coerce`] counterparts
//! into [`Arg`] values. The domain coercers resolve against the ledger
//! service or the command registry through the [`CommandContext`]; any
//! failure from those collaborators is converted into a plain coercion
//! failure and never leaks further down.

use async_trait::async_trait;

use tallybot_parsing::coerce::{self, CoerceAsync, Coercer};
use tallybot_parsing::error::CoercionError;
use tallybot_parsing::token::Token;

use crate::arg::Arg;
use crate::context::CommandContext;

/// The literal consumable wildcard that lists the available goods.
pub const WILDCARD: &str = "?";

/// Identity string coercer.
#[must_use]
pub fn string() -> Coercer<Arg, CommandContext> {
    Coercer::sync(|token, _| coerce::string(token).map(Arg::Str))
}

/// Lowercased string coercer.
#[must_use]
pub fn lowercase() -> Coercer<Arg, CommandContext> {
    Coercer::sync(|token, _| coerce::lowercase(token).map(Arg::Str))
}

/// Natural number coercer.
#[must_use]
pub fn natural() -> Coercer<Arg, CommandContext> {
    Coercer::sync(|token, _| coerce::natural(token).map(Arg::Natural))
}

/// Monetary amount coercer (minor units).
#[must_use]
pub fn amount() -> Coercer<Arg, CommandContext> {
    Coercer::sync(|token, _| coerce::amount(token).map(Arg::Amount))
}

/// Resolves a user from a bare handle or a mention token.
#[must_use]
pub fn user() -> Coercer<Arg, CommandContext> {
    Coercer::asynchronous(UserCoercer)
}

/// Resolves a registered command by name.
#[must_use]
pub fn command() -> Coercer<Arg, CommandContext> {
    Coercer::sync(|token, ctx: &CommandContext| {
        let name = coerce::lowercase(token)?;
        if ctx.registry.get(&name).is_some() {
            Ok(Arg::Command(name))
        } else {
            Err(CoercionError::new(format!("{name} is an unknown command")))
        }
    })
}

/// Resolves a consumable by name, or accepts the `?` wildcard untouched.
#[must_use]
pub fn consumable() -> Coercer<Arg, CommandContext> {
    Coercer::asynchronous(ConsumableCoercer)
}

/// Looks a user up through the ledger service.
struct UserCoercer;

#[async_trait]
impl CoerceAsync<Arg, CommandContext> for UserCoercer {
    async fn coerce(&self, token: &Token, ctx: &CommandContext) -> Result<Arg, CoercionError> {
        let alias = user_alias(token)?;
        ctx.api
            .get_user_by_alias(&alias)
            .await
            .map(Arg::User)
            .map_err(|err| CoercionError::new(err.to_string()))
    }
}

/// Looks a consumable up through the ledger service.
struct ConsumableCoercer;

#[async_trait]
impl CoerceAsync<Arg, CommandContext> for ConsumableCoercer {
    async fn coerce(&self, token: &Token, ctx: &CommandContext) -> Result<Arg, CoercionError> {
        let name = coerce::lowercase(token)?;
        if name == WILDCARD {
            return Ok(Arg::Str(name));
        }
        let consumables = ctx
            .api
            .get_consumables()
            .await
            .map_err(|err| CoercionError::new(err.to_string()))?;
        consumables
            .into_iter()
            .find(|c| c.name.eq_ignore_ascii_case(&name))
            .map(Arg::Consumable)
            .ok_or_else(|| {
                CoercionError::new(format!(
                    "{name} is not a consumable, use `{WILDCARD}` to list them"
                ))
            })
    }
}

/// The alias to look up for a token that should name a user.
fn user_alias(token: &Token) -> Result<String, CoercionError> {
    match token {
        Token::Text(text) => Ok(text.to_lowercase()),
        Token::Mention { target, .. } => {
            // Mention targets look like `https://matrix.to/#/@bob:x.yz`;
            // the handle is whatever follows the fragment marker.
            let handle = target
                .rsplit_once("#/")
                .map_or(target.as_str(), |(_, handle)| handle);
            if handle.starts_with('@') {
                Ok(handle.to_lowercase())
            } else {
                Err(CoercionError::new("Not a user mention"))
            }
        }
    }
}
