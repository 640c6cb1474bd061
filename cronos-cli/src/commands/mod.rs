//! Subcommands of the `cronos` binary, grouped by role.

mod admin;
mod auth;
mod catalog;
mod chat;
mod logistik;
mod shop;
mod wallet;

use clap::{Subcommand, ValueEnum};
use cronos_core::cart::CartError;
use cronos_core::chat::ChatError;
use cronos_core::checkout::CheckoutError;
use cronos_core::notify::Notice;
use cronos_core::orders::OrderBoardError;
use cronos_core::registration::RegistrationError;
use cronos_core::session::SessionError;
use cronos_sdk::client::ClientError;
use cronos_sdk::objects::{Participant, Role};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::state::AppState;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}", client_message(.0))]
    Client(#[from] ClientError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Orders(#[from] OrderBoardError),

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error("{0}")]
    Invalid(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// The API error behind this failure, unwrapping core component errors.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            CliError::Client(e) => Some(e),
            CliError::Checkout(e) => e.client_error(),
            CliError::Orders(e) => e.client_error(),
            CliError::Chat(e) => e.client_error(),
            CliError::Session(_)
            | CliError::Registration(_)
            | CliError::Cart(_)
            | CliError::Invalid(_)
            | CliError::Io(_) => None,
        }
    }

    /// Whether the server rejected the session token.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            CliError::Chat(e) => e.is_unauthorized(),
            other => other.client_error().is_some_and(ClientError::is_unauthorized),
        }
    }

    /// Whether a core component already showed this error as a notice.
    pub fn is_reported(&self) -> bool {
        matches!(
            self,
            CliError::Cart(_) | CliError::Checkout(_) | CliError::Orders(_)
        )
    }
}

fn client_message(e: &ClientError) -> String {
    e.server_message()
        .map(str::to_owned)
        .unwrap_or_else(|| e.to_string())
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session
    Login(auth::LoginArgs),
    /// Create an account and sign in
    Register(auth::RegisterArgs),
    /// Forget the stored session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Browse and manage products
    #[command(subcommand)]
    Products(catalog::ProductCommand),
    /// Trace a harvest batch and check its integrity
    Trace {
        batch_id: String,
    },
    /// Ponds and harvest batches (petambak)
    #[command(subcommand)]
    Tambak(catalog::TambakCommand),
    /// Order products (konsumen)
    Checkout(shop::CheckoutArgs),
    /// Orders, payment and receipt confirmation
    #[command(subcommand)]
    Orders(shop::OrderCommand),
    /// Deliveries and shipping price (logistik)
    #[command(subcommand)]
    Logistik(logistik::LogistikCommand),
    /// Escrow wallet and withdrawals
    #[command(subcommand)]
    Wallet(wallet::WalletCommand),
    /// Verification, change requests and reports (admin)
    #[command(subcommand)]
    Admin(admin::AdminCommand),
    /// Direct messages
    #[command(subcommand)]
    Chat(chat::ChatCommand),
}

/// Admin decision on a pending item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Decision {
    Approve,
    Reject,
}

pub async fn run(command: Command, state: &AppState) -> Result<(), CliError> {
    let result = match command {
        Command::Login(args) => auth::login(state, args).await,
        Command::Register(args) => auth::register(state, args).await,
        Command::Logout => auth::logout(state),
        Command::Whoami => auth::whoami(state).await,
        Command::Products(cmd) => catalog::products(state, cmd).await,
        Command::Trace { batch_id } => catalog::trace(state, &batch_id).await,
        Command::Tambak(cmd) => catalog::tambak(state, cmd).await,
        Command::Checkout(args) => shop::checkout(state, args).await,
        Command::Orders(cmd) => shop::orders(state, cmd).await,
        Command::Logistik(cmd) => logistik::run(state, cmd).await,
        Command::Wallet(cmd) => wallet::run(state, cmd).await,
        Command::Admin(cmd) => admin::run(state, cmd).await,
        Command::Chat(cmd) => chat::run(state, cmd).await,
    };

    if let Err(e) = &result {
        forget_rejected_session(state, e)?;
    }
    result
}

/// Clear the stored session when the server rejected its token. Returns
/// whether a session was removed.
fn forget_rejected_session(state: &AppState, error: &CliError) -> Result<bool, CliError> {
    if !error.is_unauthorized() {
        return Ok(false);
    }
    tracing::info!("Token rejected, clearing session");
    let cleared = state.sessions.clear()?;
    if cleared {
        state
            .notifier
            .notify(Notice::warning("Sesi berakhir, silakan login kembali"));
    }
    Ok(cleared)
}

/// Parse `role:id`, e.g. `petambak:3`.
pub fn parse_participant(s: &str) -> Result<Participant, String> {
    let (role, id) = s
        .split_once(':')
        .ok_or_else(|| format!("expected ROLE:ID, got {s:?}"))?;
    let role: Role = role.parse().map_err(|e| format!("{e}"))?;
    let id = id
        .trim()
        .parse()
        .map_err(|_| format!("invalid id {id:?}"))?;
    Ok(Participant::new(role, id))
}

pub fn rupiah(amount: Decimal) -> String {
    format!("Rp {}", amount.round_dp(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoadedConfig;
    use cronos_core::config::{ApiConfig, CheckoutConfig};
    use reqwest::StatusCode;
    use std::path::PathBuf;
    use std::time::Duration;
    use url::Url;

    fn api_error(status: StatusCode) -> ClientError {
        ClientError::Api {
            status,
            message: None,
            body: String::new(),
        }
    }

    fn state_with_session_file(name: &str) -> (AppState, PathBuf) {
        let dir = std::env::temp_dir().join(format!("cronos-cli-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let session_path = dir.join("session.json");
        std::fs::write(&session_path, "{}").unwrap();
        let config = LoadedConfig {
            api: ApiConfig {
                base_url: Url::parse("http://localhost:9000/api").unwrap(),
                socket_url: Url::parse("ws://localhost:9000/ws").unwrap(),
                timeout: Duration::from_secs(5),
            },
            checkout: CheckoutConfig::default(),
            session_path: session_path.clone(),
        };
        (AppState::new(config).unwrap(), session_path)
    }

    #[test]
    fn test_client_error_unwraps_core_errors() {
        let orders = CliError::Orders(OrderBoardError::Request {
            message: "Unauthorized".into(),
            source: api_error(StatusCode::UNAUTHORIZED),
        });
        let chat = CliError::Chat(ChatError::Request {
            message: "Unauthorized".into(),
            source: api_error(StatusCode::UNAUTHORIZED),
        });
        let checkout = CliError::Checkout(CheckoutError::OrderRejected {
            message: "Stok habis".into(),
            source: api_error(StatusCode::BAD_REQUEST),
        });

        assert!(orders.is_unauthorized());
        assert!(chat.is_unauthorized());
        assert!(checkout.client_error().is_some());
        assert!(!checkout.is_unauthorized());
        assert!(CliError::Checkout(CheckoutError::EmptyCart).client_error().is_none());
        assert!(CliError::Chat(ChatError::SessionExpired).is_unauthorized());
    }

    #[test]
    fn test_rejected_token_inside_order_error_clears_session() {
        let (state, session_path) = state_with_session_file("orders-401");
        let error = CliError::Orders(OrderBoardError::Request {
            message: "Gagal memuat pesanan".into(),
            source: api_error(StatusCode::UNAUTHORIZED),
        });

        assert!(forget_rejected_session(&state, &error).unwrap());
        assert!(!session_path.exists());
        assert!(!forget_rejected_session(&state, &error).unwrap());
    }

    #[test]
    fn test_other_failures_keep_session() {
        let (state, session_path) = state_with_session_file("orders-500");
        let error = CliError::Orders(OrderBoardError::Request {
            message: "Gagal memuat pesanan".into(),
            source: api_error(StatusCode::INTERNAL_SERVER_ERROR),
        });

        assert!(!forget_rejected_session(&state, &error).unwrap());
        assert!(session_path.exists());
        std::fs::remove_file(session_path).unwrap();
    }

    #[test]
    fn test_parse_participant() {
        assert_eq!(
            parse_participant("petambak:3"),
            Ok(Participant::new(Role::Petambak, 3))
        );
        assert_eq!(
            parse_participant("Logistik: 4"),
            Ok(Participant::new(Role::Logistik, 4))
        );
        assert!(parse_participant("petambak").is_err());
        assert!(parse_participant("kurir:1").is_err());
        assert!(parse_participant("konsumen:x").is_err());
    }

    #[test]
    fn test_rupiah_rounds_to_whole() {
        assert_eq!(rupiah(Decimal::new(11600040, 2)), "Rp 116000");
        assert_eq!(rupiah(Decimal::from(15_000)), "Rp 15000");
    }
}
