//! State shared by every command.

use std::sync::Arc;

use cronos_core::checkout::RedirectOpener;
use cronos_core::notify::Notifier;
use cronos_core::session::{Session, SessionStore};
use cronos_sdk::client::CronosClient;
use cronos_sdk::objects::Role;

use crate::commands::CliError;
use crate::config::LoadedConfig;
use crate::terminal::{TerminalNotifier, TerminalOpener};

/// Configuration, session storage and the shared HTTP connection pool.
pub struct AppState {
    pub config: LoadedConfig,
    pub sessions: SessionStore,
    pub notifier: Arc<dyn Notifier>,
    pub opener: Arc<dyn RedirectOpener>,
    http: reqwest::Client,
}

impl AppState {
    pub fn new(config: LoadedConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.api.timeout)
            .user_agent(concat!("cronos/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            sessions: SessionStore::new(config.session_path.clone()),
            notifier: Arc::new(TerminalNotifier),
            opener: Arc::new(TerminalOpener),
            config,
            http,
        })
    }

    /// Client without credentials.
    pub fn client(&self) -> CronosClient {
        CronosClient::new(self.config.api.base_url.clone()).with_http_client(self.http.clone())
    }

    /// Client carrying the stored session's token, if there is one.
    pub fn client_for_current_user(&self) -> Result<CronosClient, CliError> {
        Ok(match self.sessions.load()? {
            Some(session) => session.authorize(self.client()),
            None => self.client(),
        })
    }

    /// The stored session and a client carrying its token.
    pub fn signed_in(&self) -> Result<(Session, CronosClient), CliError> {
        let session = self.sessions.require()?;
        let client = session.authorize(self.client());
        Ok((session, client))
    }

    /// Like [`signed_in`](Self::signed_in), restricted to one role.
    pub fn signed_in_as(&self, role: Role) -> Result<(Session, CronosClient), CliError> {
        let (session, client) = self.signed_in()?;
        session.require_role(role)?;
        Ok((session, client))
    }
}
