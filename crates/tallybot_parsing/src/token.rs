//! Argument tokens.
//!
//! A token is either a plain whitespace-delimited word or an atomic mention
//! element lifted out of rich-text markup.

use std::fmt;

/// One argument token from a chat message.
///
/// Tokens are immutable once produced and their ordering is significant. A
/// mention stays a single token even when its label contains whitespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// A plain word.
    Text(String),
    /// A rich-text reference to another entity.
    Mention {
        /// The reference carried by the markup, e.g.
        /// `https://matrix.to/#/@bob:example.org`.
        target: String,
        /// The human-readable element body, e.g. `Bob`.
        label: String,
    },
}

impl Token {
    /// Creates a plain text token.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Creates a mention token.
    #[must_use]
    pub fn mention(target: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Mention {
            target: target.into(),
            label: label.into(),
        }
    }

    /// The plain word, or `None` for mentions.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Mention { .. } => None,
        }
    }

    /// The mention target, or `None` for plain words.
    #[must_use]
    pub fn mention_target(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Mention { target, .. } => Some(target),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => write!(f, "{value}"),
            Self::Mention { label, .. } => write!(f, "{label}"),
        }
    }
}
