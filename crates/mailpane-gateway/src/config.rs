//! Gateway configuration from environment variables.

use std::net::SocketAddr;

use thiserror::Error;

/// Backend base URL used when `MAILPANE_BACKEND_URL` is unset.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
/// Listen address used when `MAILPANE_LISTEN_ADDR` is unset.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Errors raised while reading the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `MAILPANE_LISTEN_ADDR` is not a valid socket address.
    #[error("invalid listen address {addr:?}: {source}")]
    InvalidListenAddr {
        /// The offending value.
        addr: String,
        /// Parse failure.
        source: std::net::AddrParseError,
    },
}

/// Runtime configuration for the gateway binary.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the mail backend, e.g. `http://localhost:8000`.
    pub backend_url: String,
    /// Address the gateway listens on.
    pub listen_addr: SocketAddr,
}

impl GatewayConfig {
    /// Reads `MAILPANE_BACKEND_URL` and `MAILPANE_LISTEN_ADDR`, falling back
    /// to the defaults of the reference deployment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_url = std::env::var("MAILPANE_BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        let addr = std::env::var("MAILPANE_LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = addr
            .parse()
            .map_err(|source| ConfigError::InvalidListenAddr { addr, source })?;
        Ok(Self {
            backend_url,
            listen_addr,
        })
    }
}
