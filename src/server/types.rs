//! Request/response bodies for the API surface.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::{damm::RemoveLiquiditySummary, dbc::ExitQuote, error::AppError};

/// Parses a base58 pubkey out of a request field, mapping failures to 400.
pub fn parse_pubkey(raw: &str, field: &str) -> Result<Pubkey, AppError> {
    Pubkey::from_str(raw)
        .map_err(|_| AppError::bad_request(format!("{field} is not a valid pubkey: {raw:?}")))
}

#[derive(Debug, Deserialize)]
pub struct LaunchRequest {
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub description: String,
    pub image_base64: Option<String>,
    pub image_url: Option<String>,
    pub twitter: Option<String>,
    pub telegram: Option<String>,
    pub website: Option<String>,
    /// DBC pool config to launch under
    pub config: String,
    /// Wallet that will sign and pay for the launch
    pub creator: String,
}

#[derive(Debug, Serialize)]
pub struct LaunchResponse {
    /// Base64 transaction, signed by the mint keypair only
    pub transaction: String,
    pub mint: String,
    pub pool: String,
    pub metadata_uri: String,
}

#[derive(Debug, Deserialize)]
pub struct DbcExitRequest {
    pub pool: String,
    /// Pool creator wallet; fee payer and signer of the returned transaction
    pub receiver: String,
}

#[derive(Debug, Serialize)]
pub struct DbcExitResponse {
    pub transaction: String,
    pub quote: ExitQuote,
}

#[derive(Debug, Deserialize)]
pub struct DbcQuoteRequest {
    pub pool: String,
}

#[derive(Debug, Serialize)]
pub struct DbcQuoteResponse {
    pub quote: ExitQuote,
}

fn default_percent() -> u64 {
    100
}

#[derive(Debug, Deserialize)]
pub struct DammExitRequest {
    pub position: String,
    pub owner: String,
    /// Share of the position's liquidity to remove, 1..=100
    #[serde(default = "default_percent")]
    pub percent: u64,
    #[serde(default)]
    pub token_a_amount_threshold: u64,
    #[serde(default)]
    pub token_b_amount_threshold: u64,
}

#[derive(Debug, Serialize)]
pub struct DammExitResponse {
    pub transaction: String,
    pub summary: RemoveLiquiditySummary,
}

#[derive(Debug, Deserialize)]
pub struct SendBundleRequest {
    /// Signed transactions in base64 wire form, in bundle order
    pub transactions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SendBundleResponse {
    pub bundle_id: String,
}

#[derive(Debug, Serialize)]
pub struct BundleStatusResponse {
    pub statuses: Vec<Value>,
}
