//! Chat conversation and message types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::role::{Participant, Role};

/// One row of `GET /chat/conversations`, computed server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    #[serde(rename = "otherId")]
    pub counterpart_id: i64,
    #[serde(rename = "otherRole")]
    pub counterpart_role: Role,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "lastMessage", default)]
    pub last_message_preview: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(rename = "unread", default)]
    pub unread_count: u32,
}

impl ConversationSummary {
    pub fn counterpart(&self) -> Participant {
        Participant::new(self.counterpart_role, self.counterpart_id)
    }
}

/// A single chat message. Ordered by `created_at` as delivered by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub sender_id: i64,
    pub sender_role: Role,
    pub receiver_id: i64,
    pub receiver_role: Role,
    pub content: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl ChatMessage {
    pub fn sender(&self) -> Participant {
        Participant::new(self.sender_role, self.sender_id)
    }

    pub fn receiver(&self) -> Participant {
        Participant::new(self.receiver_role, self.receiver_id)
    }

    /// Whether this message was exchanged between exactly `a` and `b`, in
    /// either direction.
    pub fn is_between(&self, a: Participant, b: Participant) -> bool {
        (self.sender() == a && self.receiver() == b) || (self.sender() == b && self.receiver() == a)
    }
}

/// Body of `POST /chat/messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    #[serde(rename = "receiverId")]
    pub receiver_id: i64,
    #[serde(rename = "receiverRole")]
    pub receiver_role: Role,
    pub content: String,
}

impl SendMessageRequest {
    pub fn new(to: Participant, content: impl Into<String>) -> Self {
        Self {
            receiver_id: to.id,
            receiver_role: to.role,
            content: content.into(),
        }
    }
}
