//! Configuration module for the `cronos` binary.
//!
//! Handles loading configuration from the TOML file and CLI overrides, then
//! validating it into the runtime types of `cronos-core`.

pub mod file;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cronos_core::config::{ApiConfig, CheckoutConfig};
use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

use crate::config::file::FileConfig;

/// Path of the chat socket relative to the API host.
const SOCKET_PATH: &str = "/ws";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Loaded configuration result containing all parts.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub api: ApiConfig,
    pub checkout: CheckoutConfig,
    pub session_path: PathBuf,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    api_url_override: Option<Url>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, api_url_override: Option<Url>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            api_url_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file (a missing file yields the defaults)
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    /// 4. Build the loaded configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let mut file_config = match std::fs::read_to_string(&self.config_path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = ?self.config_path, "No config file, using defaults");
                FileConfig::default()
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(api_url) = &self.api_url_override {
            file_config.api.base_url = api_url.clone();
        }

        self.validate(&file_config)?;
        self.build_loaded_config(file_config)
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        if !matches!(config.api.base_url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "api.base_url must be http or https, got {}",
                config.api.base_url
            )));
        }
        if let Some(socket_url) = &config.api.socket_url
            && !matches!(socket_url.scheme(), "ws" | "wss")
        {
            return Err(ConfigError::ValidationError(format!(
                "api.socket_url must be ws or wss, got {socket_url}"
            )));
        }
        if config.api.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "api.timeout_secs must be positive".to_string(),
            ));
        }
        if config.checkout.logistics_fee_estimate.is_sign_negative() {
            return Err(ConfigError::ValidationError(
                "checkout.logistics_fee_estimate must not be negative".to_string(),
            ));
        }
        if config.checkout.insurance_rate.is_sign_negative()
            || config.checkout.insurance_rate > Decimal::ONE
        {
            return Err(ConfigError::ValidationError(
                "checkout.insurance_rate must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }

    fn build_loaded_config(&self, file_config: FileConfig) -> Result<LoadedConfig, ConfigError> {
        let socket_url = match file_config.api.socket_url {
            Some(url) => url,
            None => derive_socket_url(&file_config.api.base_url)?,
        };

        Ok(LoadedConfig {
            api: ApiConfig {
                base_url: file_config.api.base_url,
                socket_url,
                timeout: Duration::from_secs(file_config.api.timeout_secs),
            },
            checkout: CheckoutConfig {
                logistics_fee_estimate: file_config.checkout.logistics_fee_estimate,
                insurance_rate: file_config.checkout.insurance_rate,
            },
            session_path: file_config.session.path,
        })
    }
}

/// The socket lives on the API host: `http(s)://host/api` becomes
/// `ws(s)://host/ws`.
fn derive_socket_url(base_url: &Url) -> Result<Url, ConfigError> {
    let scheme = if base_url.scheme() == "https" { "wss" } else { "ws" };
    let host = base_url.host_str().ok_or_else(|| {
        ConfigError::ValidationError(format!("api.base_url has no host: {base_url}"))
    })?;
    let authority = match base_url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    Url::parse(&format!("{scheme}://{authority}{SOCKET_PATH}"))
        .map_err(|e| ConfigError::ValidationError(format!("cannot derive socket url: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cronos-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let loader = ConfigLoader::new("/nonexistent/cronos.toml", None);
        let config = loader.load().unwrap();
        assert_eq!(config.api.socket_url.as_str(), "ws://localhost:9000/ws");
        assert_eq!(config.api.timeout, Duration::from_secs(30));
        assert_eq!(config.checkout, CheckoutConfig::default());
    }

    #[test]
    fn test_api_url_override_wins() {
        let path = write_config(
            "override.toml",
            "[api]\nbase_url = \"http://localhost:9000/api\"\n",
        );
        let override_url = Url::parse("https://cronos.example.com/api").unwrap();
        let config = ConfigLoader::new(&path, Some(override_url)).load().unwrap();
        assert_eq!(config.api.base_url.as_str(), "https://cronos.example.com/api");
        assert_eq!(config.api.socket_url.as_str(), "wss://cronos.example.com/ws");
    }

    #[test]
    fn test_invalid_insurance_rate_is_rejected() {
        let path = write_config("bad-rate.toml", "[checkout]\ninsurance_rate = 1.5\n");
        let err = ConfigLoader::new(&path, None).load().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_socket_scheme_is_checked() {
        let path = write_config(
            "bad-socket.toml",
            "[api]\nsocket_url = \"http://localhost:9000/ws\"\n",
        );
        let err = ConfigLoader::new(&path, None).load().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
