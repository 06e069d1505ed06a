//! Ordered message list with change notifications.
//!
//! The store owns every [`Message`]; insertion order is display order.
//! During a streaming response only the final element is mutated, via
//! [`update_last_text`](MessageStore::update_last_text). Observers get
//! change notifications over unbounded channels instead of reactive
//! wrappers; a dropped receiver is pruned on the next emit.

use tokio::sync::mpsc;

use crate::models::Message;

/// Sender name used for assistant-authored messages.
pub const ASSISTANT_SENDER: &str = "AI Assistant";

/// Text of the seeded welcome message.
pub const WELCOME_TEXT: &str =
    "Welcome to the chat! I'm your AI assistant. How can I help you today?";

/// A change to the message list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A message was appended.
    MessageAppended { id: String },
    /// The last message's text was rewritten.
    LastMessageUpdated,
    /// The list was emptied.
    Cleared,
}

/// Ordered list of chat messages.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    subscribers: Vec<mpsc::UnboundedSender<StoreEvent>>,
}

impl MessageStore {
    /// Create a store seeded with the welcome message.
    pub fn new() -> Self {
        let mut store = Self::default();
        store.messages.push(Message::new(WELCOME_TEXT, ASSISTANT_SENDER, false));
        store
    }

    /// Create a completely empty store. Used by tests.
    pub fn empty() -> Self {
        Self::default()
    }

    /// All messages, in display order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages.
    pub fn count(&self) -> usize {
        self.messages.len()
    }

    /// Append a message to the end of the list.
    pub fn append(&mut self, message: Message) {
        let id = message.id.clone();
        self.messages.push(message);
        self.emit(StoreEvent::MessageAppended { id });
    }

    /// Replace the text of the final message.
    ///
    /// No-op when the list is empty. Id, sender, timestamp, and position
    /// of the message are untouched.
    pub fn update_last_text(&mut self, text: impl Into<String>) {
        let Some(last) = self.messages.last_mut() else {
            return;
        };
        last.text = text.into();
        self.emit(StoreEvent::LastMessageUpdated);
    }

    /// Remove every message. Idempotent.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.emit(StoreEvent::Cleared);
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<StoreEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: StoreEvent) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}
