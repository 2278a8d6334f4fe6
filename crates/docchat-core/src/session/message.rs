//! Chat transcript message types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a transcript message.
///
/// Placeholder resolution is addressed by id, never by position, so a
/// resolution arriving out of order can only ever touch its own message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

/// Represents the role of a message in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the assistant (answers, status, and error text).
    Assistant,
}

/// Lifecycle of a transcript message.
///
/// Most messages are born `Final`. The optimistic placeholder appended at
/// send time is born `Pending` and moves to `Final` exactly once, when the
/// in-flight operation resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageState {
    /// Waiting for an in-flight backend call to resolve.
    Pending,
    /// Terminal: the text will not change again.
    Final,
}

/// A single message in the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Stable identity used for placeholder resolution.
    pub id: MessageId,
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub text: String,
    /// Whether the text should be rendered through the answer formatter.
    pub formatted: bool,
    /// Lifecycle state.
    pub state: MessageState,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

impl ChatMessage {
    pub fn is_pending(&self) -> bool {
        self.state == MessageState::Pending
    }
}
