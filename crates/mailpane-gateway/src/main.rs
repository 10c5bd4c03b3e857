//! Gateway binary: serve the proxy router over TCP.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mailpane_gateway::{GatewayConfig, ProxyState, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailpane_gateway=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env()?;
    info!("Forwarding /emails to {}", config.backend_url);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("Gateway listening on {}", listener.local_addr()?);

    let state = ProxyState::new(&config.backend_url);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
