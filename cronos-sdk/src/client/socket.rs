//! Realtime chat socket connector.
//!
//! One socket per chat widget. After connecting, the client joins its own
//! room and a background task forwards decoded [`SocketServerFrame`]s into
//! an mpsc channel until the server closes, the connection breaks, or the
//! [`ChatSocket`] handle is disconnected or dropped. There is no automatic
//! reconnection.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use super::ClientError;
use crate::objects::{Participant, SocketClientFrame, SocketServerFrame};

/// Buffer between the socket reader task and the consumer.
pub const SOCKET_FRAME_BUFFER: usize = 64;

/// Handle to a connected chat socket.
///
/// Dropping the handle tears the connection down.
#[derive(Debug)]
pub struct ChatSocket {
    room: String,
    shutdown_tx: watch::Sender<bool>,
    reader: Option<JoinHandle<()>>,
}

/// Connect to the chat socket at `url` and join `me`'s room.
///
/// Returns the connection handle and the receiver of pushed frames. The
/// receiver yields `None` once the connection is gone.
pub async fn connect_chat_socket(
    url: &Url,
    me: Participant,
) -> Result<(ChatSocket, mpsc::Receiver<SocketServerFrame>), ClientError> {
    let (ws, _response) = connect_async(url.as_str()).await?;
    let (mut sink, mut stream) = ws.split();

    let room = me.room();
    let join = serde_json::to_string(&SocketClientFrame::JoinRoom { room: room.clone() })?;
    sink.send(Message::Text(join)).await?;
    tracing::debug!(%room, "Chat socket joined room");

    let (frames_tx, frames_rx) = mpsc::channel(SOCKET_FRAME_BUFFER);
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let task_room = room.clone();

    let reader = tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;

                _ = shutdown_rx.changed() => {
                    let _ = sink.send(Message::Close(None)).await;
                    tracing::debug!(room = %task_room, "Chat socket disconnected by client");
                    break;
                }

                msg = stream.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            match serde_json::from_str::<SocketServerFrame>(&text) {
                                Ok(SocketServerFrame::Unknown) => {
                                    tracing::trace!(room = %task_room, "Ignoring unhandled socket event");
                                }
                                Ok(frame) => {
                                    if frames_tx.send(frame).await.is_err() {
                                        break;
                                    }
                                }
                                Err(e) => {
                                    tracing::warn!(error = %e, room = %task_room, "Undecodable socket frame");
                                }
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            tracing::info!(room = %task_room, "Chat socket closed by server");
                            break;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::warn!(error = %e, room = %task_room, "Chat socket failed");
                            break;
                        }
                    }
                }
            }
        }
    });

    Ok((
        ChatSocket {
            room,
            shutdown_tx,
            reader: Some(reader),
        },
        frames_rx,
    ))
}

impl ChatSocket {
    /// Room this socket joined, `{role}_{id}`.
    pub fn room(&self) -> &str {
        &self.room
    }

    /// Whether the reader task is still running.
    pub fn is_open(&self) -> bool {
        self.reader.as_ref().is_some_and(|r| !r.is_finished())
    }

    /// Close the connection and wait for the reader task to finish.
    pub async fn disconnect(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(reader) = self.reader.take() {
            let _ = reader.await;
        }
    }
}

impl Drop for ChatSocket {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}
