//! API endpoint configuration.

use std::time::Duration;

use url::Url;

/// Where the CRONOS API and its chat socket live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// REST root, e.g. `http://localhost:9000/api`.
    pub base_url: Url,
    /// Chat WebSocket endpoint.
    pub socket_url: Url,
    /// Per-request timeout for REST calls.
    pub timeout: Duration,
}
