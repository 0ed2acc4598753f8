use axum_extra::extract::cookie::Key;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

use crate::error::CatalogError;

/// Basic (core) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// TOML: `basic.listen_addr`. Default: `0.0.0.0`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// TOML: `basic.listen_port`. Default: `8188`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Database URL for SQLite.
    /// TOML: `basic.database_url`. Default: `sqlite://test.db`.
    #[serde(default)]
    pub database_url: String,

    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// TOML: `basic.loglevel`. Default: `info`.
    #[serde(default)]
    pub loglevel: String,

    /// Base64-encoded key (at least 64 bytes once decoded) used to encrypt flash cookies.
    /// TOML: `basic.cookie_secret`. Default: unset, a random key is generated at startup
    /// and flash messages do not survive a restart.
    #[serde(default)]
    pub cookie_secret: Option<String>,

    /// Drop the `Secure` attribute from cookies so they work over plain HTTP.
    /// TOML: `basic.insecure_cookie`. Default: `false`.
    #[serde(default)]
    pub insecure_cookie: bool,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            listen_port: default_listen_port(),
            database_url: "sqlite://test.db".to_string(),
            loglevel: "info".to_string(),
            cookie_secret: None,
            insecure_cookie: false,
        }
    }
}

impl BasicConfig {
    /// Resolves the cookie key: decoded from `cookie_secret`, or freshly generated.
    pub fn cookie_key(&self) -> Result<Key, CatalogError> {
        let Some(secret) = self
            .cookie_secret
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        else {
            return Ok(Key::generate());
        };

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(secret)
            .map_err(|e| CatalogError::Config(format!("basic.cookie_secret is not base64: {e}")))?;
        Key::try_from(bytes.as_slice()).map_err(|_| {
            CatalogError::Config(format!(
                "basic.cookie_secret must decode to at least 64 bytes, got {}",
                bytes.len()
            ))
        })
    }
}

/// Default IP address for the HTTP server listen address.
fn default_listen_ip() -> IpAddr {
    Ipv4Addr::new(0, 0, 0, 0).into()
}

/// Default port for the HTTP server.
fn default_listen_port() -> u16 {
    8188
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_secret_generates_a_key() {
        let cfg = BasicConfig::default();
        assert!(cfg.cookie_key().is_ok());
    }

    #[test]
    fn short_secret_is_rejected() {
        let cfg = BasicConfig {
            cookie_secret: Some(base64::engine::general_purpose::STANDARD.encode([7u8; 16])),
            ..Default::default()
        };
        assert!(matches!(cfg.cookie_key(), Err(CatalogError::Config(_))));
    }

    #[test]
    fn long_secret_is_accepted() {
        let cfg = BasicConfig {
            cookie_secret: Some(base64::engine::general_purpose::STANDARD.encode([7u8; 64])),
            ..Default::default()
        };
        assert!(cfg.cookie_key().is_ok());
    }
}
