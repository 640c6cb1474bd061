//! Signed-in user state.
//!
//! A [`Session`] is populated by login or registration, read by every
//! protected command, and cleared on logout. It is passed explicitly to
//! the components that need it. [`SessionStore`] persists it as a JSON
//! file between runs; the token's expiry is never checked client-side.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use cronos_sdk::client::{ClientError, CronosClient};
use cronos_sdk::objects::{
    AuthResponse, LoginRequest, Participant, RegisterRequest, Role, UserProfile,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Silakan login terlebih dahulu")]
    NotLoggedIn,

    #[error("Akses khusus {required}, akun ini {actual}")]
    WrongRole { required: Role, actual: Role },

    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub user: UserProfile,
}

impl Session {
    pub fn from_auth(role: Role, auth: AuthResponse) -> Self {
        Self {
            token: auth.token,
            role,
            user: auth.user,
        }
    }

    /// `POST /auth/login/{role}` and build the resulting session.
    pub async fn login(
        client: &CronosClient,
        role: Role,
        request: &LoginRequest,
    ) -> Result<Self, ClientError> {
        let auth = client.login(role, request).await?;
        info!(user_id = auth.user.id, %role, "Logged in");
        Ok(Self::from_auth(role, auth))
    }

    /// `POST /auth/register/{role}`; the server signs the new account in.
    pub async fn register(
        client: &CronosClient,
        request: &RegisterRequest,
    ) -> Result<Self, ClientError> {
        let role = request.role();
        let auth = client.register(request).await?;
        info!(user_id = auth.user.id, %role, "Registered");
        Ok(Self::from_auth(role, auth))
    }

    pub fn participant(&self) -> Participant {
        Participant::new(self.role, self.user.id)
    }

    /// Fail unless this session belongs to `role`.
    pub fn require_role(&self, role: Role) -> Result<&Self, SessionError> {
        if self.role == role {
            Ok(self)
        } else {
            Err(SessionError::WrongRole {
                required: role,
                actual: self.role,
            })
        }
    }

    /// Attach this session's bearer token to `client`.
    pub fn authorize(&self, client: CronosClient) -> CronosClient {
        client.with_token(self.token.clone())
    }
}

/// JSON file holding the current session, if any.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session. A missing file means nobody is signed in.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let session = serde_json::from_str(&raw)?;
        debug!(path = %self.path.display(), "Loaded session");
        Ok(Some(session))
    }

    /// Like [`load`](Self::load), but a missing session is an error.
    pub fn require(&self) -> Result<Session, SessionError> {
        self.load()?.ok_or(SessionError::NotLoggedIn)
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;
        debug!(path = %self.path.display(), "Saved session");
        Ok(())
    }

    /// Remove the stored session. Returns whether one existed.
    pub fn clear(&self) -> Result<bool, SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::from_auth(
            Role::Konsumen,
            AuthResponse {
                user: crate::test_support::user(9, "Budi"),
                token: "tok-123".into(),
            },
        )
    }

    fn temp_store(name: &str) -> SessionStore {
        let dir = std::env::temp_dir().join(format!("cronos-session-{}-{name}", std::process::id()));
        SessionStore::new(dir.join("session.json"))
    }

    #[test]
    fn test_round_trip_through_file() {
        let store = temp_store("round-trip");
        assert!(store.load().unwrap().is_none());

        store.save(&session()).unwrap();
        assert_eq!(store.load().unwrap(), Some(session()));

        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
        assert!(matches!(store.require(), Err(SessionError::NotLoggedIn)));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let store = temp_store("corrupt");
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), b"{not json").unwrap();

        assert!(matches!(store.load(), Err(SessionError::Json(_))));
        store.clear().unwrap();
    }

    #[test]
    fn test_participant_and_role_guard() {
        let session = session();
        assert_eq!(session.participant().room(), "konsumen_9");
        assert!(session.require_role(Role::Konsumen).is_ok());
        assert!(matches!(
            session.require_role(Role::Admin),
            Err(SessionError::WrongRole {
                required: Role::Admin,
                actual: Role::Konsumen
            })
        ));
    }
}
