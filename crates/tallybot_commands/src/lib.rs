//! Command executors for Tallybot.
//!
//! Every command owns a [`CommandParser`](tallybot_parsing::CommandParser)
//! built at construction time and a `run` implementation that turns the
//! parsed arguments into one reply. Commands never talk to a transport;
//! they receive a [`ChatEvent`] and return reply text, and the runtime's
//! dispatcher decides what to do with it.
//!
//! # Modules
//!
//! - [`arg`] - The parsed argument value type
//! - [`event`] - Transport-agnostic incoming message model
//! - [`context`] - Side-channel handed to coercers and handlers
//! - [`base`] - The [`Command`] trait and command-level errors
//! - [`registry`] - Read-only name-to-command lookup
//! - [`coercers`] - Argument coercers, including the remote-lookup ones
//! - [`format`] - Shared reply formatting helpers
//! - one module per command executor

pub mod arg;
pub mod base;
pub mod coercers;
pub mod context;
pub mod event;
pub mod format;
pub mod registry;

pub mod balance;
pub mod blame;
pub mod consume;
pub mod data;
pub mod funds;
pub mod help;
pub mod history;
pub mod send;
pub mod start;

// Re-export main types for convenience
pub use arg::Arg;
pub use base::{Command, CommandError};
pub use context::CommandContext;
pub use event::{ChatEvent, RoomInfo};
pub use registry::CommandRegistry;
