//! Append-only chat transcript with identity-addressed placeholders.

use chrono::Utc;

use super::message::{ChatMessage, MessageId, MessageRole, MessageState};

/// The ordered log of chat messages for one session.
///
/// Messages are append-only. The single permitted mutation is resolving a
/// pending placeholder into its terminal text, addressed by `MessageId`;
/// a second resolution for the same id, or a resolution for an id that was
/// never appended, is absorbed as a no-op.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a final message and returns its id.
    pub fn push(&mut self, role: MessageRole, text: impl Into<String>) -> MessageId {
        self.append(role, text.into(), false, MessageState::Final)
    }

    /// Appends a pending assistant placeholder and returns its id.
    pub fn push_placeholder(&mut self, text: impl Into<String>) -> MessageId {
        self.append(
            MessageRole::Assistant,
            text.into(),
            false,
            MessageState::Pending,
        )
    }

    /// Resolves a pending placeholder into its terminal text.
    ///
    /// Returns `true` if the message existed and was still pending. A stale
    /// resolution (unknown id, or already resolved) returns `false` and
    /// changes nothing.
    pub fn resolve(&mut self, id: MessageId, text: impl Into<String>, formatted: bool) -> bool {
        match self.messages.iter_mut().find(|m| m.id == id) {
            Some(message) if message.state == MessageState::Pending => {
                message.text = text.into();
                message.formatted = formatted;
                message.state = MessageState::Final;
                true
            }
            _ => false,
        }
    }

    /// All messages in append order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether any placeholder is still waiting for resolution.
    pub fn has_pending(&self) -> bool {
        self.messages.iter().any(|m| m.is_pending())
    }

    fn append(
        &mut self,
        role: MessageRole,
        text: String,
        formatted: bool,
        state: MessageState,
    ) -> MessageId {
        let id = MessageId::new();
        self.messages.push(ChatMessage {
            id,
            role,
            text,
            formatted,
            state,
            timestamp: Utc::now().to_rfc3339(),
        });
        id
    }
}
