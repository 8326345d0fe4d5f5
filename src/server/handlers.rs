//! API route handlers: validate input, call the builders, serialize the
//! transaction, return JSON. No signing with user keys happens here.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use solana_sdk::transaction::VersionedTransaction;
use tracing::info;

use crate::{
    common::{
        deserialize_transaction_base64, serialize_transaction_base64, PriorityFee,
    },
    config::resolve_storage_jwt,
    damm::build_remove_liquidity_transaction,
    dbc::{
        build_exit_transaction, build_launch_transaction, fetch_pool, quote_exit, ExitError,
        LaunchParams,
    },
    error::AppError,
    ipfs::{create_token_metadata, CreateTokenMetadata},
};

use super::types::*;
use super::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn launch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LaunchRequest>,
) -> Result<Json<LaunchResponse>, AppError> {
    let config = parse_pubkey(&req.config, "config")?;
    let creator = parse_pubkey(&req.creator, "creator")?;

    let jwt = resolve_storage_jwt()?;
    let ipfs = create_token_metadata(
        CreateTokenMetadata {
            name: req.name.clone(),
            symbol: req.symbol.clone(),
            description: req.description,
            image_base64: req.image_base64,
            image_url: req.image_url,
            twitter: req.twitter,
            telegram: req.telegram,
            website: req.website,
        },
        &jwt,
    )
    .await?;

    let params = LaunchParams {
        name: req.name,
        symbol: req.symbol,
        metadata_uri: ipfs.metadata_uri.clone(),
        config,
        creator,
    };
    params
        .validate()
        .map_err(|e| AppError::bad_request(e.to_string()))?;

    let (transaction, mint, pool) =
        build_launch_transaction(&state.rpc, &params, PriorityFee::default()).await?;

    info!("launch built: mint={mint} pool={pool}");
    Ok(Json(LaunchResponse {
        transaction: serialize_transaction_base64(&transaction)?,
        mint: mint.to_string(),
        pool: pool.to_string(),
        metadata_uri: ipfs.metadata_uri,
    }))
}

pub async fn dbc_exit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DbcExitRequest>,
) -> Result<Json<DbcExitResponse>, AppError> {
    let pool = parse_pubkey(&req.pool, "pool")?;
    let receiver = parse_pubkey(&req.receiver, "receiver")?;

    let (transaction, quote) = build_exit_transaction(
        &state.rpc,
        &pool,
        &receiver,
        &state.config.fee_split,
        state.config.platform_fee_wallet.as_ref(),
        PriorityFee::default(),
    )
    .await
    .map_err(|e| {
        // Pool-state rejections are the caller's problem, not ours.
        if e.downcast_ref::<ExitError>().is_some() {
            AppError::bad_request(e.to_string())
        } else {
            e.into()
        }
    })?;

    info!(
        "exit built: pool={pool} quote_claim={} leftover={}",
        quote.claimable_quote, quote.leftover_base
    );
    Ok(Json(DbcExitResponse {
        transaction: serialize_transaction_base64(&transaction)?,
        quote,
    }))
}

pub async fn dbc_quote(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DbcQuoteRequest>,
) -> Result<Json<DbcQuoteResponse>, AppError> {
    let pool_address = parse_pubkey(&req.pool, "pool")?;
    let pool = fetch_pool(&state.rpc, &pool_address).await?;
    Ok(Json(DbcQuoteResponse {
        quote: quote_exit(
            &pool,
            &state.config.fee_split,
            state.config.platform_fee_wallet.as_ref(),
        ),
    }))
}

pub async fn damm_exit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DammExitRequest>,
) -> Result<Json<DammExitResponse>, AppError> {
    let position = parse_pubkey(&req.position, "position")?;
    let owner = parse_pubkey(&req.owner, "owner")?;
    if req.percent == 0 || req.percent > 100 {
        return Err(AppError::bad_request("percent must be between 1 and 100"));
    }

    let (transaction, summary) = build_remove_liquidity_transaction(
        &state.rpc,
        &position,
        &owner,
        req.percent,
        req.token_a_amount_threshold,
        req.token_b_amount_threshold,
        PriorityFee::default(),
    )
    .await?;

    Ok(Json(DammExitResponse {
        transaction: serialize_transaction_base64(&transaction)?,
        summary,
    }))
}

pub async fn send_bundle(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendBundleRequest>,
) -> Result<Json<SendBundleResponse>, AppError> {
    if req.transactions.is_empty() {
        return Err(AppError::bad_request("bundle is empty"));
    }
    if req.transactions.len() > 5 {
        return Err(AppError::bad_request("bundle holds at most 5 transactions"));
    }

    let mut bundle = Vec::with_capacity(req.transactions.len());
    for encoded in &req.transactions {
        let transaction = deserialize_transaction_base64(encoded)
            .map_err(|e| AppError::bad_request(e.to_string()))?;
        bundle.push(VersionedTransaction::from(transaction));
    }

    let bundle_id = state.jito.send_bundle(&bundle).await?;
    info!("bundle submitted: {bundle_id}");
    Ok(Json(SendBundleResponse { bundle_id }))
}

pub async fn bundle_status(
    State(state): State<Arc<AppState>>,
    Path(bundle_id): Path<String>,
) -> Result<Json<BundleStatusResponse>, AppError> {
    let statuses = state.jito.get_bundle_statuses(&[bundle_id]).await?;
    Ok(Json(BundleStatusResponse { statuses }))
}
