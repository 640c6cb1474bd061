//! HTTP client for the CRONOS API and the realtime chat socket.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.
//!
//! [`CronosClient`] is one configured `reqwest::Client` plus a base URL and
//! an optional bearer token. Endpoint methods are grouped by domain in the
//! submodules; each maps one REST endpoint to one typed request/response.

mod admin;
mod auth;
mod chat;
mod orders;
mod products;
mod reports;
mod socket;
mod tambak;
mod wallet;

pub use reports::ADMIN_REPORT_FILE_NAME;
pub use socket::{ChatSocket, connect_chat_socket};

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::objects::{Ack, ApiErrorBody};

/// Errors produced by the SDK clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Api {
        status: StatusCode,
        /// The `message` field of the error body, when present.
        message: Option<String>,
        body: String,
    },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The chat socket failed to connect or broke.
    #[error("websocket error: {0}")]
    WebSocket(#[from] Box<tokio_tungstenite::tungstenite::Error>),
}

impl ClientError {
    /// The server's own error text, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Text to show a user: the server's message verbatim, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }

    /// `true` when the server rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Api { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        ClientError::WebSocket(Box::new(e))
    }
}

/// Typed HTTP client for the CRONOS REST API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct CronosClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl CronosClient {
    /// Create a new `CronosClient`.
    ///
    /// * `base_url` – API root, e.g. `http://localhost:9000/api`. Endpoint
    ///   paths are resolved relative to it, so a path prefix is kept.
    pub fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http: Client::new(),
            base_url,
            token: None,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Attach a bearer token to every subsequent request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        let resp = self.authorize(self.http.get(url)).send().await?;
        parse_response(resp).await
    }

    async fn get_json_with_query<Q: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        let resp = self.authorize(self.http.get(url)).query(query).send().await?;
        parse_response(resp).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        let resp = self.authorize(self.http.post(url)).json(body).send().await?;
        parse_response(resp).await
    }

    async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        let resp = self.authorize(self.http.put(url)).json(body).send().await?;
        parse_response(resp).await
    }

    async fn post_for_ack<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Ack, ClientError> {
        let url = self.endpoint(path)?;
        let mut request = self.authorize(self.http.post(url));
        if let Some(body) = body {
            request = request.json(body);
        }
        let resp = request.send().await?;
        parse_ack(resp).await
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.message);
    Err(ClientError::Api {
        status,
        message,
        body,
    })
}

async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let resp = check_status(resp).await?;
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}

/// Like [`parse_response`], but an empty body is a valid acknowledgement.
async fn parse_ack(resp: reqwest::Response) -> Result<Ack, ClientError> {
    let resp = check_status(resp).await?;
    let bytes = resp.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Ack::default());
    }
    match serde_json::from_slice::<Ack>(&bytes) {
        Ok(ack) => Ok(ack),
        // Some actions answer with a bare string or the updated record.
        Err(_) => Ok(Ack::default()),
    }
}
