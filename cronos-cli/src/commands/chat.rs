//! Direct messages over REST plus the realtime socket.

use std::sync::Arc;

use clap::Subcommand;
use cronos_core::chat::{ChatError, ChatWidget, PushOutcome};
use cronos_core::notify::Notice;
use cronos_sdk::objects::{ChatMessage, Participant};
use time::macros::format_description;

use super::{CliError, parse_participant};
use crate::shutdown::spawn_shutdown_watch;
use crate::state::AppState;

#[derive(Debug, Subcommand)]
pub enum ChatCommand {
    /// List conversations with unread counts
    Conversations,
    /// Show the messages exchanged with ROLE:ID
    Thread {
        #[arg(value_parser = parse_participant)]
        with: Participant,
    },
    /// Send a message to ROLE:ID
    Send {
        #[arg(value_parser = parse_participant)]
        with: Participant,
        content: String,
    },
    /// Stay connected and print incoming messages until interrupted
    Listen {
        /// Open the thread with ROLE:ID while listening
        #[arg(long, value_parser = parse_participant)]
        with: Option<Participant>,
    },
}

fn print_message(me: Participant, message: &ChatMessage) {
    let clock = message
        .created_at
        .format(format_description!("[hour]:[minute]"))
        .unwrap_or_default();
    let from = if message.sender() == me {
        "saya".to_string()
    } else {
        message.sender().room()
    };
    println!("[{clock}] {from}: {}", message.content);
}

pub async fn run(state: &AppState, cmd: ChatCommand) -> Result<(), CliError> {
    let (session, client) = state.signed_in()?;
    let me = session.participant();
    let mut widget = ChatWidget::new(Arc::new(client), me);

    match cmd {
        ChatCommand::Conversations => {
            widget.refresh_conversations().await?;
            if widget.conversations().is_empty() {
                println!("Belum ada percakapan");
            }
            let unread = widget.total_unread();
            if unread > 0 {
                println!("{unread} pesan belum dibaca");
            }
            for c in widget.conversations() {
                let unread = if c.unread_count > 0 {
                    format!(" ({} baru)", c.unread_count)
                } else {
                    String::new()
                };
                println!(
                    "{:<14} {:<20} {}{unread}",
                    c.counterpart().room(),
                    c.display_name,
                    c.last_message_preview
                );
            }
        }
        ChatCommand::Thread { with } => {
            for message in widget.open_thread(with).await? {
                print_message(me, message);
            }
        }
        ChatCommand::Send { with, content } => {
            widget.open_thread(with).await?;
            let sent = widget.send_message(&content).await?;
            print_message(me, &sent);
        }
        ChatCommand::Listen { with } => {
            let mut shutdown = spawn_shutdown_watch();
            widget.connect(&state.config.api.socket_url).await?;
            if let Some(counterpart) = with {
                for message in widget.open_thread(counterpart).await? {
                    print_message(me, message);
                }
            }
            state.notifier.notify(Notice::info(format!(
                "Terhubung sebagai {}, tekan Ctrl+C untuk keluar",
                me.room()
            )));

            loop {
                tokio::select! {
                    _ = shutdown.changed() => break,
                    event = widget.next_event() => match event {
                        Some(PushOutcome::Appended(message)) => print_message(me, &message),
                        Some(PushOutcome::OtherConversation(message)) => {
                            state.notifier.notify(Notice::info(format!(
                                "Pesan baru dari {} ({} belum dibaca)",
                                message.sender().room(),
                                widget.total_unread()
                            )));
                        }
                        Some(PushOutcome::Ignored) => {}
                        None if widget.auth_lost() => {
                            return Err(ChatError::SessionExpired.into());
                        }
                        None => {
                            state
                                .notifier
                                .notify(Notice::warning("Koneksi chat terputus"));
                            break;
                        }
                    },
                }
            }
            widget.stop().await;
        }
    }
    Ok(())
}
