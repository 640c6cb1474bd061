//! Realtime chat socket frames.
//!
//! The chat socket is a WebSocket carrying JSON text frames.
//!
//! # Protocol
//!
//! 1. After the upgrade the client sends a
//!    [`SocketClientFrame::JoinRoom`] naming its own room, `{role}_{id}`.
//! 2. The server pushes a [`SocketServerFrame::NewMessage`] to the rooms of
//!    both the sender and the receiver whenever a message is stored.
//! 3. Either side may close. The client does not reconnect on its own.

use serde::{Deserialize, Serialize};

use super::chat::ChatMessage;

/// Client-to-server frame.
///
/// ```json
/// {"event":"join_room","room":"konsumen_9"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SocketClientFrame {
    JoinRoom { room: String },
}

/// Server-to-client frame, dispatched on the `"event"` field:
///
/// ```json
/// {"event":"new_message","message":{ ... }}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SocketServerFrame {
    /// A message was stored with this user as sender or receiver.
    NewMessage { message: ChatMessage },

    /// Any event this client does not handle.
    #[serde(other)]
    Unknown,
}
