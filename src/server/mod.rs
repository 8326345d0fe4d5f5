//! The `/api/*` surface: an axum router over the transaction builders.

pub mod handlers;
pub mod types;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::{common::SolanaRpcClient, config::GatewayConfig, jito::JitoClient};

pub struct AppState {
    pub rpc: Arc<SolanaRpcClient>,
    pub jito: JitoClient,
    pub config: GatewayConfig,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        let rpc = Arc::new(SolanaRpcClient::new(config.rpc_url.clone()));
        let jito = JitoClient::new(&config.jito_url);
        Self { rpc, jito, config }
    }
}

/// Builds the router. CORS is permissive: the API serves a browser frontend.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/launch", post(handlers::launch))
        .route("/api/dbc/exit", post(handlers::dbc_exit))
        .route("/api/dbc/quote", post(handlers::dbc_quote))
        .route("/api/damm/exit", post(handlers::damm_exit))
        .route("/api/bundle/send", post(handlers::send_bundle))
        .route("/api/bundle/status/:bundle_id", get(handlers::bundle_status))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
