//! Command-argument parsing for chat messages.
//!
//! This crate turns one incoming chat message into a validated, typed set of
//! named arguments that a command handler can consume.
//!
//! # Architecture
//!
//! ```text
//! "!send 10.5 <a href=".../@bob:x.yz">Bob</a> thanks"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → ["10.5", Mention(@bob:x.yz, "Bob"), "thanks"]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ USAGE           │  → first usage whose arity bounds fit the token count
//! │ SELECTION       │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ACTION          │  → each slot greedily coerces tokens, pushing the
//! │ CONSUMPTION     │    first rejected token back for the next slot
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ NAMESPACE       │  → { amount: 1050, receiver: User(bob), reason: [..] }
//! └─────────────────┘
//! ```
//!
//! Usages are the backtracking mechanism: a command declares one grammar per
//! accepted form, and the parser tries them in declaration order. There is no
//! search within a usage; an action never reconsiders a token it rejected.
//!
//! # Modules
//!
//! - [`token`] - Argument tokens, plain words and atomic mentions
//! - [`tokenizer`] - Message bodies to token streams, mention markup included
//! - [`coerce`] - Sync/async token-to-value conversion
//! - [`action`] - One named argument slot with arity, default, and choices
//! - [`usage`] - One complete alternative grammar for a command
//! - [`parser`] - Usage selection and the consumption loop
//! - [`namespace`] - The parse result mapping
//! - [`error`] - Tokenization, coercion, and aggregated parse errors

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod coerce;
pub mod error;
pub mod namespace;
pub mod parser;
pub mod token;
pub mod tokenizer;
pub mod usage;

// Re-export main types for convenience
pub use action::{Action, Arity};
pub use coerce::{CoerceAsync, Coercer};
pub use error::{CoercionError, ParseError, ParsingError, TokenizeError};
pub use namespace::{ArgValue, Namespace};
pub use parser::CommandParser;
pub use token::Token;
pub use tokenizer::{Message, Tokenizer};
pub use usage::Usage;
