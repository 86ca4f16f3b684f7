//! The interactive console session.
//!
//! Drives the dispatcher from a local terminal: every line is wrapped into
//! a chat event from the configured operator handle and the reply is
//! rendered back as plain text. Used for local development and demos; a
//! network transport would replace this loop, not the dispatcher.

use tallybot_commands::{ChatEvent, CommandRegistry, RoomInfo};
use tallybot_parsing::Message;

use crate::dispatcher::Dispatcher;
use crate::editor::{EditorError, LineEditor, ReadResult, RustylineEditor};
use crate::render;

/// An interactive session feeding terminal input to the dispatcher.
pub struct ConsoleSession<E: LineEditor = RustylineEditor> {
    editor: E,
    dispatcher: Dispatcher,
    sender: String,
    room: RoomInfo,
    show_banner: bool,
}

impl ConsoleSession<RustylineEditor> {
    /// Creates a session with the default rustyline editor, completing over
    /// the registered command names.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(
        dispatcher: Dispatcher,
        registry: &CommandRegistry,
        sender: impl Into<String>,
    ) -> Result<Self, EditorError> {
        let completions = registry
            .iter()
            .map(|command| format!("{}{}", dispatcher.prefix(), command.name()))
            .collect();
        let editor = RustylineEditor::new(completions)?;
        Ok(Self::with_editor(editor, dispatcher, sender))
    }
}

impl<E: LineEditor> ConsoleSession<E> {
    /// Creates a session with the given editor.
    pub fn with_editor(editor: E, dispatcher: Dispatcher, sender: impl Into<String>) -> Self {
        Self {
            editor,
            dispatcher,
            sender: sender.into(),
            room: RoomInfo::new("!console:local", 2),
            show_banner: true,
        }
    }

    /// Suppresses the welcome banner.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Runs the read-dispatch-print loop until EOF.
    ///
    /// Dispatching is async, so the session borrows a runtime handle and
    /// blocks on each reply.
    ///
    /// # Errors
    ///
    /// Returns an error when the terminal interaction fails.
    pub fn run(&mut self, handle: &tokio::runtime::Handle) -> Result<(), EditorError> {
        if self.show_banner {
            println!(
                "tallybot console — you are {}; try {}help, Ctrl+D exits",
                self.sender,
                self.dispatcher.prefix()
            );
        }

        loop {
            match self.editor.read_line("> ")? {
                ReadResult::Line(line) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    self.editor.add_history(&line);

                    let event = ChatEvent::new(
                        self.sender.clone(),
                        self.room.clone(),
                        Message::plain(line),
                    );
                    match handle.block_on(self.dispatcher.handle(&event)) {
                        Some(reply) => println!("{}", render::html_to_text(&reply)),
                        None => println!(
                            "(not a command; start with `{}`)",
                            self.dispatcher.prefix()
                        ),
                    }
                }
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            }
        }
        Ok(())
    }
}
