//! Transport-agnostic incoming message model.
//!
//! The chat transport delivers events in whatever shape it likes; the
//! dispatch layer converts them to this model before any command sees them.

use tallybot_parsing::Message;

/// The room a message arrived in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomInfo {
    /// Transport-level room id.
    pub id: String,
    /// Number of room members, the bot included.
    pub member_count: usize,
}

impl RoomInfo {
    /// Creates room info.
    #[must_use]
    pub fn new(id: impl Into<String>, member_count: usize) -> Self {
        Self {
            id: id.into(),
            member_count,
        }
    }

    /// Whether this is a private chat between one user and the bot.
    ///
    /// Some commands restrict themselves to private rooms to protect
    /// personal data.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.member_count <= 2
    }
}

/// One incoming chat message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatEvent {
    /// Sender handle, e.g. `@alice:example.org`.
    pub sender: String,
    /// Room the message arrived in.
    pub room: RoomInfo,
    /// The textual content, plain and optionally formatted.
    pub message: Message,
}

impl ChatEvent {
    /// Creates an event.
    #[must_use]
    pub fn new(sender: impl Into<String>, room: RoomInfo, message: Message) -> Self {
        Self {
            sender: sender.into(),
            room,
            message,
        }
    }
}
