use std::net::SocketAddr;
use std::sync::Arc;

use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use launchpad_gateway::config::GatewayConfig;
use launchpad_gateway::server::{router, AppState};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = GatewayConfig::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("rpc endpoint: {}", config.rpc_url);
    info!("bundle relay: {}", config.jito_url);

    let state = Arc::new(AppState::new(config));
    let app = router(state);

    info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
