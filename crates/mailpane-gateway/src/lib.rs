//! # mailpane-gateway
//!
//! Same-origin HTTP surface for the mailbox UI: a stateless proxy that
//! 1:1-forwards `/emails` requests to the external mail backend, passing
//! status codes and bodies through unchanged.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod config;
pub mod proxy;

pub use config::{ConfigError, DEFAULT_BACKEND_URL, DEFAULT_LISTEN_ADDR, GatewayConfig};
pub use proxy::{ProxyState, router};
