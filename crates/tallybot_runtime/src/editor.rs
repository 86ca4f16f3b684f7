//! Line editor abstraction for the console session.
//!
//! This module provides a trait-based abstraction over line editing
//! libraries, allowing the console session to use rustyline while staying
//! drivable from tests with a scripted editor.

use std::borrow::Cow;

use rustyline::Context;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Config, Editor, Helper};
use thiserror::Error;

/// A failed terminal interaction.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The underlying line editor failed.
    #[error("line editor failure: {0}")]
    Readline(String),
}

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D (EOF).
    Eof,
}

/// Abstraction over line editing functionality.
pub trait LineEditor {
    /// Reads a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult, EditorError>;

    /// Adds a line to history.
    fn add_history(&mut self, line: &str);
}

/// Completer over the registered command names (prefix included).
struct CommandCompleter {
    commands: Vec<String>,
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Only the leading word is a command name.
        if line[..pos].contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let word = &line[..pos];
        let candidates = self
            .commands
            .iter()
            .filter(|name| name.starts_with(word))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

/// Helper wiring completion and history hints into rustyline.
struct SessionHelper {
    completer: CommandCompleter,
    hinter: HistoryHinter,
}

impl Completer for SessionHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Hinter for SessionHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for SessionHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

impl Validator for SessionHelper {}

impl Helper for SessionHelper {}

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<SessionHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a rustyline-based editor completing over the given command
    /// names.
    ///
    /// # Errors
    ///
    /// Returns an error if rustyline initialization fails.
    pub fn new(commands: Vec<String>) -> Result<Self, EditorError> {
        let config = Config::builder().auto_add_history(false).build();
        let helper = SessionHelper {
            completer: CommandCompleter { commands },
            hinter: HistoryHinter::new(),
        };

        let mut editor = Editor::with_config(config)
            .map_err(|err| EditorError::Readline(err.to_string()))?;
        editor.set_helper(Some(helper));
        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult, EditorError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(err) => Err(EditorError::Readline(err.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }
}
