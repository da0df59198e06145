//! One-time operator messages.
//!
//! Actions report their outcome ("3 objects were marked as active.") by
//! adding a message to the request's [`MessageStorage`]. The host drains the
//! storage when it renders the next page.

use serde::{Deserialize, Serialize};

/// The severity level of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MessageLevel {
    /// Debug-level message, typically not shown in production.
    Debug = 10,
    /// Informational message. Default for [`message_user`](crate::handler::ModelAdminHandler::message_user).
    Info = 20,
    /// Success notification.
    Success = 25,
    /// Warning that requires attention.
    Warning = 30,
    /// Error message indicating a failure.
    Error = 40,
}

impl MessageLevel {
    /// Returns the CSS tag class for this level.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A single operator notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The severity level of this message.
    pub level: MessageLevel,
    /// The message text.
    pub text: String,
}

impl Message {
    /// Creates a new message with the given level and text.
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    /// Returns the CSS tags used to render this message.
    pub const fn tags(&self) -> &'static str {
        self.level.tag()
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Storage for one-time messages.
///
/// # Examples
///
/// ```
/// use basic_models_admin::messages::MessageStorage;
///
/// let mut storage = MessageStorage::new();
/// storage.info("1 object was marked as active.");
///
/// let messages = storage.get_messages();
/// assert_eq!(messages.len(), 1);
///
/// // Messages are drained after reading
/// assert!(storage.get_messages().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageStorage {
    messages: Vec<Message>,
}

impl MessageStorage {
    /// Creates a new empty message storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message with the given level and text.
    pub fn add(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.messages.push(Message::new(level, text));
    }

    /// Drains and returns all stored messages.
    pub fn get_messages(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.messages)
    }

    /// Returns the stored messages without consuming them.
    pub fn peek_messages(&self) -> &[Message] {
        &self.messages
    }

    /// Adds an info-level message.
    pub fn info(&mut self, text: impl Into<String>) {
        self.add(MessageLevel::Info, text);
    }

    /// Adds a success-level message.
    pub fn success(&mut self, text: impl Into<String>) {
        self.add(MessageLevel::Success, text);
    }

    /// Adds a warning-level message.
    pub fn warning(&mut self, text: impl Into<String>) {
        self.add(MessageLevel::Warning, text);
    }

    /// Adds an error-level message.
    pub fn error(&mut self, text: impl Into<String>) {
        self.add(MessageLevel::Error, text);
    }

    /// Returns the number of stored messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if no messages are stored.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
