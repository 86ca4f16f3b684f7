//! Tallybot - chat bot for shared drinks and money
//!
//! This crate re-exports all layers of the Tallybot system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: tallybot_runtime  — Config, dispatch, console session, CLI
//! Layer 2: tallybot_commands — Command executors and registry
//! Layer 1: tallybot_api      — Ledger schemas and client boundary
//! Layer 0: tallybot_parsing  — Command-argument parsing engine
//! ```

pub use tallybot_api as api;
pub use tallybot_commands as commands;
pub use tallybot_parsing as parsing;
pub use tallybot_runtime as runtime;
