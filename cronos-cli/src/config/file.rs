//! TOML file configuration structures.
//!
//! These structs directly map to the `cronos.toml` file format. Every
//! section is optional; a missing file behaves like an empty one.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub checkout: CheckoutConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// API section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// REST root (e.g. "http://localhost:9000/api").
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Chat socket endpoint. Derived from `base_url` when absent.
    #[serde(default)]
    pub socket_url: Option<Url>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            socket_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[allow(clippy::expect_used)]
fn default_base_url() -> Url {
    Url::parse("http://localhost:9000/api").expect("valid default url")
}

fn default_timeout_secs() -> u64 {
    30
}

/// Checkout estimate section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Flat shipping estimate shown before a LOGISTIC_PARTNER order exists.
    #[serde(default = "default_logistics_fee", with = "rust_decimal::serde::float")]
    pub logistics_fee_estimate: Decimal,
    /// Insurance premium as a fraction of the subtotal.
    #[serde(default = "default_insurance_rate", with = "rust_decimal::serde::float")]
    pub insurance_rate: Decimal,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            logistics_fee_estimate: default_logistics_fee(),
            insurance_rate: default_insurance_rate(),
        }
    }
}

fn default_logistics_fee() -> Decimal {
    cronos_core::config::CheckoutConfig::DEFAULT_LOGISTICS_FEE_ESTIMATE
}

fn default_insurance_rate() -> Decimal {
    cronos_core::config::CheckoutConfig::DEFAULT_INSURANCE_RATE
}

/// Session persistence section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Where the signed-in session is stored.
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

fn default_session_path() -> PathBuf {
    PathBuf::from(".cronos/session.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[api]
base_url = "https://cronos.example.com/api"
socket_url = "wss://cronos.example.com/ws"
timeout_secs = 10

[checkout]
logistics_fee_estimate = 20000
insurance_rate = 0.02

[session]
path = "/tmp/cronos/session.json"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url.host_str(), Some("cronos.example.com"));
        assert_eq!(
            config.api.socket_url.as_ref().map(Url::scheme),
            Some("wss")
        );
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.checkout.logistics_fee_estimate, Decimal::from(20_000));
        assert_eq!(config.checkout.insurance_rate, Decimal::new(2, 2));
        assert_eq!(config.session.path, PathBuf::from("/tmp/cronos/session.json"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url.as_str(), "http://localhost:9000/api");
        assert!(config.api.socket_url.is_none());
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.checkout.logistics_fee_estimate, Decimal::from(15_000));
        assert_eq!(config.checkout.insurance_rate, Decimal::new(1, 2));
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: FileConfig = toml::from_str("[checkout]\ninsurance_rate = 0.05\n").unwrap();
        assert_eq!(config.checkout.insurance_rate, Decimal::new(5, 2));
        assert_eq!(config.checkout.logistics_fee_estimate, Decimal::from(15_000));
    }
}
