//! Environment-backed configuration.
//!
//! Every endpoint and key the gateway needs is resolved from the process
//! environment exactly once, at startup, into a [`GatewayConfig`]. Validation
//! errors name the offending variable so a bad deploy fails loudly.

use std::env;

use anyhow::anyhow;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::common::fees::FeeSplitConfig;
use crate::constants::{endpoints, fees::DEFAULT_PLATFORM_FEE_BPS};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Resolves the Solana RPC endpoint. `RPC_URL` wins, then `SOLANA_RPC_URL`,
/// then the public mainnet endpoint.
pub fn resolve_rpc_url() -> Result<String, anyhow::Error> {
    rpc_url_from(env::var("RPC_URL").ok(), env::var("SOLANA_RPC_URL").ok())
}

fn rpc_url_from(
    primary: Option<String>,
    fallback: Option<String>,
) -> Result<String, anyhow::Error> {
    // Validation errors must blame the variable the value came from.
    let (url, var) = match (primary, fallback) {
        (Some(url), _) => (url, "RPC_URL"),
        (None, Some(url)) => (url, "SOLANA_RPC_URL"),
        (None, None) => (endpoints::DEFAULT_RPC_URL.to_string(), "RPC_URL"),
    };
    validate_http_url(&url, var)?;
    Ok(url)
}

/// Resolves the block-engine bundle endpoint from `JITO_BLOCK_ENGINE_URL`.
pub fn resolve_jito_url() -> Result<String, anyhow::Error> {
    let url = env::var("JITO_BLOCK_ENGINE_URL")
        .unwrap_or_else(|_| endpoints::DEFAULT_JITO_URL.to_string());
    validate_http_url(&url, "JITO_BLOCK_ENGINE_URL")?;
    Ok(url)
}

/// Resolves the storage bearer token. Only the upload path requires it, so a
/// missing value is an error at call time rather than at startup.
pub fn resolve_storage_jwt() -> Result<String, anyhow::Error> {
    env::var("PINATA_JWT").map_err(|_| anyhow!("PINATA_JWT is not set"))
}

fn validate_http_url(url: &str, var: &str) -> Result<(), anyhow::Error> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{var} must be an http(s) URL, got {url:?}"))
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub rpc_url: String,
    pub jito_url: String,
    pub host: String,
    pub port: u16,
    pub fee_split: FeeSplitConfig,
    /// Receiver of the platform share of claimed fees. When unset, exit
    /// transactions carry no platform transfer.
    pub platform_fee_wallet: Option<Pubkey>,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let rpc_url = resolve_rpc_url()?;
        let jito_url = resolve_jito_url()?;

        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow!("PORT must be a u16, got {raw:?}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let platform_bps = match env::var("PLATFORM_FEE_BPS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| anyhow!("PLATFORM_FEE_BPS must be an integer, got {raw:?}"))?,
            Err(_) => DEFAULT_PLATFORM_FEE_BPS,
        };
        let fee_split = FeeSplitConfig::new(platform_bps)?;

        let platform_fee_wallet = match env::var("PLATFORM_FEE_WALLET") {
            Ok(raw) => Some(
                Pubkey::from_str(&raw)
                    .map_err(|_| anyhow!("PLATFORM_FEE_WALLET is not a valid pubkey: {raw:?}"))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            rpc_url,
            jito_url,
            host,
            port,
            fee_split,
            platform_fee_wallet,
        })
    }
}
