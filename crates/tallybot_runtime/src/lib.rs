//! Runtime glue for Tallybot.
//!
//! Everything between a chat transport and the command layer: configuration
//! loading, logging setup, message dispatch with the error-reply policy,
//! reply rendering for terminals, and an interactive console session used
//! for local development.
//!
//! # Modules
//!
//! - [`config`] - JSON configuration file
//! - [`logging`] - Tracing subscriber setup
//! - [`dispatcher`] - Routes events to commands and renders failures
//! - [`render`] - Formatted reply text to terminal text
//! - [`editor`] - Line editor abstraction over rustyline
//! - [`console`] - The interactive local session

pub mod config;
pub mod console;
pub mod dispatcher;
pub mod editor;
pub mod logging;
pub mod render;

// Re-export main types for convenience
pub use config::{ApiConfig, Config, ConfigError};
pub use console::ConsoleSession;
pub use dispatcher::Dispatcher;
pub use editor::{EditorError, LineEditor, ReadResult, RustylineEditor};
