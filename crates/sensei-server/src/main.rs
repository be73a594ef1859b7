//! sensei-server: standalone chat funnel server.
//!
//! See `config` for the environment variables it reads.

use anyhow::{Context, Result};
use sensei_server::{app, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sensei_server=info,sensei_core=info,tower_http=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    config
        .catalog
        .validate()
        .context("product catalog has a malformed checkout destination")?;

    tracing::info!(
        origins = config.allowed_origins.len(),
        "Loaded configuration"
    );

    let app = app(&config);

    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", config.bind_addr, e);
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Port {} is already in use. Set SENSEI_BIND_ADDR to another address",
                    config.bind_addr.port()
                );
            }
            return Err(e).context("failed to bind listener");
        }
    };
    tracing::info!("sensei-server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
