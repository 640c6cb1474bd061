//! Realtime chat widget.
//!
//! One widget per signed-in user. It holds one socket joined to the user's
//! own room, the conversation list and, while a thread is open, that
//! thread's messages. Only the widget mutates this state.
//!
//! # Push handling
//!
//! A `new_message` push is appended to the open thread only when it was
//! exchanged between the user and the active counterpart. Every push
//! triggers a conversation refetch so unread counts stay current.
//!
//! Sent messages are not appended from the HTTP response; they show up
//! when the server echoes them over the socket. A dropped socket is not
//! reconnected.

use std::sync::Arc;

use cronos_sdk::client::{ChatSocket, ClientError, connect_chat_socket};
use cronos_sdk::objects::{
    ChatMessage, ConversationSummary, Participant, SendMessageRequest, SocketServerFrame,
};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use url::Url;

use crate::api::ChatApi;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Pesan tidak boleh kosong")]
    EmptyMessage,

    #[error("Pilih percakapan terlebih dahulu")]
    NoActiveThread,

    #[error("{message}")]
    Request {
        message: String,
        #[source]
        source: ClientError,
    },

    #[error("Koneksi chat gagal")]
    Socket(#[source] ClientError),

    /// The socket was closed after the server rejected the token.
    #[error("Sesi berakhir, silakan login kembali")]
    SessionExpired,
}

impl ChatError {
    fn request(source: ClientError, fallback: &str) -> Self {
        Self::Request {
            message: source.user_message(fallback),
            source,
        }
    }

    /// The underlying API or socket error, if any.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            ChatError::Request { source, .. } | ChatError::Socket(source) => Some(source),
            ChatError::EmptyMessage | ChatError::NoActiveThread | ChatError::SessionExpired => {
                None
            }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ChatError::SessionExpired)
            || self.client_error().is_some_and(ClientError::is_unauthorized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Result of handling one pushed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// The message belonged to the open thread and was appended.
    Appended(ChatMessage),
    /// The message belonged to another conversation.
    OtherConversation(ChatMessage),
    /// The frame carried nothing for this widget.
    Ignored,
}

pub struct ChatWidget {
    api: Arc<dyn ChatApi>,
    me: Participant,
    state: ConnectionState,
    socket: Option<ChatSocket>,
    frames: Option<mpsc::Receiver<SocketServerFrame>>,
    conversations: Vec<ConversationSummary>,
    active: Option<Participant>,
    thread: Vec<ChatMessage>,
    auth_lost: bool,
}

impl ChatWidget {
    pub fn new(api: Arc<dyn ChatApi>, me: Participant) -> Self {
        Self {
            api,
            me,
            state: ConnectionState::Disconnected,
            socket: None,
            frames: None,
            conversations: Vec::new(),
            active: None,
            thread: Vec::new(),
            auth_lost: false,
        }
    }

    pub fn me(&self) -> Participant {
        self.me
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn conversations(&self) -> &[ConversationSummary] {
        &self.conversations
    }

    pub fn active(&self) -> Option<Participant> {
        self.active
    }

    pub fn thread(&self) -> &[ChatMessage] {
        &self.thread
    }

    /// Whether the widget disconnected because the token was rejected.
    pub fn auth_lost(&self) -> bool {
        self.auth_lost
    }

    pub fn total_unread(&self) -> u32 {
        self.conversations.iter().map(|c| c.unread_count).sum()
    }

    /// Open the socket at `url` and join this user's room.
    pub async fn connect(&mut self, url: &Url) -> Result<(), ChatError> {
        self.state = ConnectionState::Connecting;
        match connect_chat_socket(url, self.me).await {
            Ok((socket, frames)) => {
                info!(room = socket.room(), "Chat connected");
                self.socket = Some(socket);
                self.attach(frames);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Chat socket connection failed");
                self.state = ConnectionState::Disconnected;
                Err(ChatError::Socket(e))
            }
        }
    }

    /// Consume pushed frames from `frames`.
    pub fn attach(&mut self, frames: mpsc::Receiver<SocketServerFrame>) {
        self.frames = Some(frames);
        self.state = ConnectionState::Connected;
    }

    /// Reload the conversation list, replacing it wholesale.
    pub async fn refresh_conversations(&mut self) -> Result<&[ConversationSummary], ChatError> {
        let conversations = match self.api.conversations().await {
            Ok(conversations) => conversations,
            Err(e) => return Err(self.request_failed(e, "Gagal memuat percakapan").await),
        };
        self.conversations = conversations;
        Ok(&self.conversations)
    }

    /// Make `counterpart` the active thread and load its messages.
    pub async fn open_thread(&mut self, counterpart: Participant) -> Result<&[ChatMessage], ChatError> {
        let messages = match self.api.messages_with(counterpart).await {
            Ok(messages) => messages,
            Err(e) => return Err(self.request_failed(e, "Gagal memuat pesan").await),
        };
        self.active = Some(counterpart);
        self.thread = messages;
        debug!(counterpart = %counterpart.room(), count = self.thread.len(), "Thread opened");

        // Fetching a thread marks it read server-side.
        match self.refresh_conversations().await {
            Err(e) if e.is_unauthorized() => return Err(e),
            Err(e) => warn!(error = %e, "Conversation refresh after opening thread failed"),
            Ok(_) => {}
        }
        Ok(&self.thread)
    }

    /// Return to the conversation list.
    pub fn close_thread(&mut self) {
        self.active = None;
        self.thread.clear();
    }

    /// Whether `message` belongs to the open thread.
    pub fn belongs_to_active_thread(&self, message: &ChatMessage) -> bool {
        self.active
            .is_some_and(|counterpart| message.is_between(self.me, counterpart))
    }

    pub async fn handle_push(&mut self, frame: SocketServerFrame) -> PushOutcome {
        let SocketServerFrame::NewMessage { message } = frame else {
            return PushOutcome::Ignored;
        };

        let outcome = if self.belongs_to_active_thread(&message) {
            self.thread.push(message.clone());
            PushOutcome::Appended(message)
        } else {
            PushOutcome::OtherConversation(message)
        };

        if let Err(e) = self.refresh_conversations().await {
            warn!(error = %e, "Conversation refresh after push failed");
        }
        outcome
    }

    /// Wait for the next pushed frame and handle it.
    ///
    /// Returns `None` once the socket is gone; the widget is then
    /// disconnected.
    pub async fn next_event(&mut self) -> Option<PushOutcome> {
        let frame = self.frames.as_mut()?.recv().await;
        match frame {
            Some(frame) => Some(self.handle_push(frame).await),
            None => {
                info!("Chat socket ended");
                self.frames = None;
                self.socket = None;
                self.state = ConnectionState::Disconnected;
                None
            }
        }
    }

    /// Send `content` to the active counterpart.
    ///
    /// Content is sent as typed; blank content is refused. The stored
    /// message is returned but not appended; the socket echo appends it.
    pub async fn send_message(&mut self, content: &str) -> Result<ChatMessage, ChatError> {
        if content.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let counterpart = self.active.ok_or(ChatError::NoActiveThread)?;

        let request = SendMessageRequest::new(counterpart, content);
        match self.api.send_message(&request).await {
            Ok(message) => Ok(message),
            Err(e) => Err(self.request_failed(e, "Gagal mengirim pesan").await),
        }
    }

    /// Wrap a failed request. A rejected token tears the socket down.
    async fn request_failed(&mut self, source: ClientError, fallback: &str) -> ChatError {
        if source.is_unauthorized() {
            self.auth_lost = true;
            if self.state != ConnectionState::Disconnected {
                warn!("Chat token rejected, disconnecting");
                self.stop().await;
            }
        }
        ChatError::request(source, fallback)
    }

    /// Disconnect the socket.
    pub async fn stop(&mut self) {
        self.frames = None;
        if let Some(socket) = self.socket.take() {
            socket.disconnect().await;
        }
        self.state = ConnectionState::Disconnected;
        debug!("Chat widget stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeApi, conversation, message};
    use cronos_sdk::objects::Role;

    fn me() -> Participant {
        Participant::new(Role::Konsumen, 9)
    }

    fn petambak() -> Participant {
        Participant::new(Role::Petambak, 3)
    }

    fn widget(api: FakeApi) -> (Arc<FakeApi>, ChatWidget) {
        let api = Arc::new(api);
        (api.clone(), ChatWidget::new(api, me()))
    }

    fn push(message: ChatMessage) -> SocketServerFrame {
        SocketServerFrame::NewMessage { message }
    }

    #[tokio::test]
    async fn test_push_for_open_thread_is_appended_both_directions() {
        let api = FakeApi::default().with_thread(vec![message(1, petambak(), me())]);
        let (api, mut widget) = widget(api);
        widget.open_thread(petambak()).await.unwrap();

        let incoming = widget.handle_push(push(message(2, petambak(), me()))).await;
        let echo = widget.handle_push(push(message(3, me(), petambak()))).await;

        assert!(matches!(incoming, PushOutcome::Appended(_)));
        assert!(matches!(echo, PushOutcome::Appended(_)));
        assert_eq!(
            widget.thread().iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(
            api.calls(),
            vec![
                "messages_with:petambak_3",
                "conversations",
                "conversations",
                "conversations"
            ]
        );
    }

    #[tokio::test]
    async fn test_push_for_other_conversation_only_refetches() {
        let (api, mut widget) = widget(FakeApi::default());
        widget.open_thread(petambak()).await.unwrap();
        let before = api.calls().len();

        let logistik = Participant::new(Role::Logistik, 4);
        let outcome = widget.handle_push(push(message(7, me(), logistik))).await;

        assert!(matches!(outcome, PushOutcome::OtherConversation(_)));
        assert!(widget.thread().is_empty());
        assert_eq!(api.calls()[before..].to_vec(), vec!["conversations"]);
    }

    #[tokio::test]
    async fn test_same_id_different_role_is_not_the_counterpart() {
        let (_api, mut widget) = widget(FakeApi::default());
        widget.open_thread(petambak()).await.unwrap();

        let impostor = Participant::new(Role::Logistik, 3);
        let outcome = widget.handle_push(push(message(8, impostor, me()))).await;

        assert!(matches!(outcome, PushOutcome::OtherConversation(_)));
    }

    #[tokio::test]
    async fn test_push_without_open_thread_refreshes_unread() {
        let api = FakeApi::default().with_conversations(vec![
            conversation(petambak(), 2),
            conversation(Participant::new(Role::Logistik, 4), 1),
        ]);
        let (_api, mut widget) = widget(api);

        let outcome = widget.handle_push(push(message(1, petambak(), me()))).await;

        assert!(matches!(outcome, PushOutcome::OtherConversation(_)));
        assert_eq!(widget.total_unread(), 3);
    }

    #[tokio::test]
    async fn test_send_requires_content_and_counterpart() {
        let (api, mut widget) = widget(FakeApi::default());

        assert!(matches!(
            widget.send_message("halo").await,
            Err(ChatError::NoActiveThread)
        ));
        widget.open_thread(petambak()).await.unwrap();
        assert!(matches!(
            widget.send_message("  ").await,
            Err(ChatError::EmptyMessage)
        ));
        assert!(!api.calls().iter().any(|c| c.starts_with("send_message")));
    }

    #[tokio::test]
    async fn test_sent_message_waits_for_echo() {
        let (api, mut widget) = widget(FakeApi::default());
        widget.open_thread(petambak()).await.unwrap();

        let sent = widget.send_message(" Masih ada stok? ").await.unwrap();

        assert_eq!(sent.content, " Masih ada stok? ");
        assert!(widget.thread().is_empty());
        assert!(api.calls().contains(&"send_message:petambak_3".to_owned()));

        widget.handle_push(push(sent)).await;
        assert_eq!(widget.thread().len(), 1);
    }

    #[tokio::test]
    async fn test_attached_channel_drives_state() {
        let (_api, mut widget) = widget(FakeApi::default());
        assert_eq!(widget.state(), ConnectionState::Disconnected);

        let (tx, rx) = mpsc::channel(4);
        widget.attach(rx);
        assert_eq!(widget.state(), ConnectionState::Connected);

        tx.send(SocketServerFrame::Unknown).await.unwrap();
        drop(tx);
        assert_eq!(widget.next_event().await, Some(PushOutcome::Ignored));
        assert_eq!(widget.next_event().await, None);
        assert_eq!(widget.state(), ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_rejected_token_on_push_refetch_disconnects() {
        let (api, mut widget) = widget(FakeApi::default().rejecting_token());
        let (tx, rx) = mpsc::channel(4);
        widget.attach(rx);

        tx.send(push(message(1, petambak(), me()))).await.unwrap();
        let outcome = widget.next_event().await;

        assert!(matches!(outcome, Some(PushOutcome::OtherConversation(_))));
        assert_eq!(widget.state(), ConnectionState::Disconnected);
        assert!(widget.auth_lost());
        assert_eq!(widget.next_event().await, None);
        assert_eq!(api.calls(), vec!["conversations"]);
    }

    #[tokio::test]
    async fn test_rejected_token_on_open_thread_disconnects() {
        let (_api, mut widget) = widget(FakeApi::default().rejecting_token());
        let (_tx, rx) = mpsc::channel(4);
        widget.attach(rx);

        let err = widget.open_thread(petambak()).await.unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(widget.state(), ConnectionState::Disconnected);
        assert_eq!(widget.active(), None);
    }

    #[tokio::test]
    async fn test_close_thread_returns_to_list() {
        let api = FakeApi::default().with_thread(vec![message(1, petambak(), me())]);
        let (_api, mut widget) = widget(api);
        widget.open_thread(petambak()).await.unwrap();

        widget.close_thread();

        assert_eq!(widget.active(), None);
        assert!(widget.thread().is_empty());
        let outcome = widget.handle_push(push(message(2, petambak(), me()))).await;
        assert!(matches!(outcome, PushOutcome::OtherConversation(_)));
    }
}
