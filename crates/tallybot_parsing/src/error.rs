//! Error types for the parsing engine.
//!
//! Uses `thiserror` for ergonomic error definition. The taxonomy separates
//! corrupt input (tokenization failures) from ordinary bad arguments
//! (coercion and arity failures, aggregated into one [`ParsingError`]).

use thiserror::Error;

/// Corrupt rich-text markup in an incoming message.
///
/// This is fatal for the message and distinct from [`ParsingError`]: it
/// indicates broken input from the transport, not a user who mistyped an
/// argument. Callers should log it as an anomaly rather than reply with it.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TokenizeError {
    /// A mention element was still open at the end of the body.
    #[error("malformed markup: unclosed mention element")]
    UnclosedMention,

    /// A closing tag appeared without a matching open element.
    #[error("malformed markup: unmatched closing tag")]
    UnmatchedClose,

    /// A tag was opened but never terminated with `>`.
    #[error("malformed markup: unterminated tag")]
    UnterminatedTag,
}

/// A token failed to convert into the value an argument slot expects.
///
/// Value-level and recoverable: the rejected token is pushed back for the
/// next slot and the reason feeds the aggregated error when no usage
/// matches. Remote-lookup failures are normalized into this type by the
/// coercers; nothing below the parser boundary leaks a transport error.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct CoercionError(String);

impl CoercionError {
    /// Creates a coercion failure with a human-readable reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// No declared usage accepted the message's arguments.
///
/// The message combines, per declared usage, its syntax string and the
/// specific reason that usage was rejected. It reads as a natural-language
/// explanation and is meant to be replied to the user verbatim.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ParsingError {
    /// Combined, user-facing explanation: one line per declared usage.
    pub message: String,
}

impl ParsingError {
    /// Creates a parsing error from an already-rendered message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure of a whole parse call.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The message markup was corrupt; not a user error.
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    /// Every declared usage rejected the arguments.
    #[error(transparent)]
    Rejected(#[from] ParsingError),
}
