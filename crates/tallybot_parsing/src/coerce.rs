//! Token coercion.
//!
//! A coercer converts one token into a typed value or reports that the token
//! does not fit the slot. Failures are recoverable by design: they push the
//! token back for the next slot and feed the aggregated parse error.
//!
//! The sync/async split is a closed tagged union rather than any runtime
//! introspection of the function object: a [`Coercer::Sync`] never suspends,
//! a [`Coercer::Async`] may await a remote lookup.

use std::fmt;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;

use crate::error::CoercionError;
use crate::token::Token;

/// A synchronous coercion function.
pub type SyncCoerce<V, C> = Arc<dyn Fn(&Token, &C) -> Result<V, CoercionError> + Send + Sync>;

/// A conversion that suspends for a remote lookup.
///
/// A trait rather than a function type so lookups can carry their own state
/// and stay object-safe behind the tagged union.
#[async_trait]
pub trait CoerceAsync<V, C>: Send + Sync {
    /// Runs the conversion.
    ///
    /// # Errors
    ///
    /// Returns a [`CoercionError`] when the token does not fit the expected
    /// type or the backing lookup turned it down.
    async fn coerce(&self, token: &Token, ctx: &C) -> Result<V, CoercionError>;
}

/// Converts tokens into typed values, synchronously or via a remote lookup.
///
/// `V` is the coerced value type and `C` the context supplying whatever
/// side-channel the conversion needs (e.g. an API client handle).
pub enum Coercer<V, C> {
    /// A pure conversion with no I/O.
    Sync(SyncCoerce<V, C>),
    /// A conversion that suspends for a remote lookup.
    Async(Arc<dyn CoerceAsync<V, C>>),
}

impl<V, C> Coercer<V, C> {
    /// Wraps a synchronous conversion function.
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(&Token, &C) -> Result<V, CoercionError> + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(f))
    }

    /// Wraps an asynchronous lookup.
    pub fn asynchronous(lookup: impl CoerceAsync<V, C> + 'static) -> Self {
        Self::Async(Arc::new(lookup))
    }

    /// Runs the conversion, awaiting only when the coercer is asynchronous.
    ///
    /// # Errors
    ///
    /// Returns a [`CoercionError`] when the token does not fit the expected
    /// type or the backing lookup turned it down.
    pub async fn coerce(&self, token: &Token, ctx: &C) -> Result<V, CoercionError>
    where
        C: Sync,
    {
        match self {
            Self::Sync(f) => f(token, ctx),
            Self::Async(lookup) => lookup.coerce(token, ctx).await,
        }
    }
}

impl<V, C> Clone for Coercer<V, C> {
    fn clone(&self) -> Self {
        match self {
            Self::Sync(f) => Self::Sync(Arc::clone(f)),
            Self::Async(lookup) => Self::Async(Arc::clone(lookup)),
        }
    }
}

impl<V, C> fmt::Debug for Coercer<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(_) => f.write_str("Coercer::Sync"),
            Self::Async(_) => f.write_str("Coercer::Async"),
        }
    }
}

static AMOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // A non-zero run of digits with an optional , or . followed by exactly
    // one or two fractional digits.
    Regex::new(r"^(\d+)(?:[,.](\d)(\d)?)?$").expect("valid amount pattern")
});

/// The token's plain text, rejecting mentions.
///
/// Tokens are structured here: a mention is never silently treated as its
/// label by a text coercer.
///
/// # Errors
///
/// Returns a [`CoercionError`] when the token is a mention.
pub fn text_of(token: &Token) -> Result<&str, CoercionError> {
    token
        .as_text()
        .ok_or_else(|| CoercionError::new("Expected plain text, not a mention"))
}

/// Identity string coercer.
///
/// # Errors
///
/// Fails on mention tokens.
pub fn string(token: &Token) -> Result<String, CoercionError> {
    text_of(token).map(str::to_string)
}

/// Lowercased string coercer.
///
/// # Errors
///
/// Fails on mention tokens.
pub fn lowercase(token: &Token) -> Result<String, CoercionError> {
    text_of(token).map(str::to_lowercase)
}

/// Uppercased string coercer.
///
/// # Errors
///
/// Fails on mention tokens.
pub fn uppercase(token: &Token) -> Result<String, CoercionError> {
    text_of(token).map(str::to_uppercase)
}

/// Converts the token into an amount of money in minor units.
///
/// Accepts `"123"`, `"1.23"` and `"1,2"`; at most two fractional digits.
///
/// # Errors
///
/// Fails on mentions, on anything the amount pattern rejects, on zero, and
/// on values that overflow the minor-unit representation.
pub fn amount(token: &Token) -> Result<i64, CoercionError> {
    let text = text_of(token)?;
    let caps = AMOUNT_PATTERN
        .captures(text)
        .ok_or_else(|| CoercionError::new("Doesn't look like an amount of money"))?;

    let whole: i64 = caps[1]
        .parse()
        .map_err(|_| CoercionError::new("The amount is too large"))?;
    let mut value = whole
        .checked_mul(100)
        .ok_or_else(|| CoercionError::new("The amount is too large"))?;
    if let Some(tenths) = caps.get(2) {
        value += tenths.as_str().parse::<i64>().unwrap_or(0) * 10;
    }
    if let Some(hundredths) = caps.get(3) {
        value += hundredths.as_str().parse::<i64>().unwrap_or(0);
    }

    if value == 0 {
        return Err(CoercionError::new("An amount can't be zero"));
    }
    Ok(value)
}

/// Converts the token into a natural number (strictly positive integer).
///
/// # Errors
///
/// Fails on mentions, non-integers, zero, and negative numbers.
pub fn natural(token: &Token) -> Result<u32, CoercionError> {
    let text = text_of(token)?;
    let value: i64 = text
        .parse()
        .map_err(|_| CoercionError::new("Not an integer"))?;
    if value <= 0 {
        return Err(CoercionError::new("Not a positive integer"));
    }
    u32::try_from(value).map_err(|_| CoercionError::new("The number is too large"))
}
