//! `/chat` endpoints. New messages are pushed over the chat socket.

use super::{ClientError, CronosClient};
use crate::objects::{ChatMessage, ConversationSummary, Participant, SendMessageRequest};

impl CronosClient {
    /// `GET /chat/conversations`
    pub async fn conversations(&self) -> Result<Vec<ConversationSummary>, ClientError> {
        self.get_json("chat/conversations").await
    }

    /// `GET /chat/messages/{role}/{id}` – the thread with `counterpart`.
    /// The server marks fetched messages as read.
    pub async fn messages_with(
        &self,
        counterpart: Participant,
    ) -> Result<Vec<ChatMessage>, ClientError> {
        self.get_json(&format!(
            "chat/messages/{}/{}",
            counterpart.role, counterpart.id
        ))
        .await
    }

    /// `POST /chat/messages`
    pub async fn send_message(
        &self,
        request: &SendMessageRequest,
    ) -> Result<ChatMessage, ClientError> {
        self.post_json("chat/messages", request).await
    }
}
