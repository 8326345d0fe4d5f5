//! Token launch: initialize a virtual pool for a freshly generated mint.
//!
//! The server generates the mint keypair and partially signs with it; the
//! creator's wallet adds the fee-payer signature client side.

use anyhow::anyhow;
use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    transaction::Transaction,
};

use crate::{
    common::{create_priority_fee_instructions, PriorityFee, SolanaRpcClient},
    constants,
    instruction::{initialize_virtual_pool, InitializePool},
};

use super::get_pool_pda;

#[derive(Debug, Clone)]
pub struct LaunchParams {
    pub name: String,
    pub symbol: String,
    pub metadata_uri: String,
    /// DBC pool config the launch is created under
    pub config: Pubkey,
    /// Wallet launching the token; pays fees and signs client side
    pub creator: Pubkey,
}

impl LaunchParams {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.name.is_empty() || self.name.len() > 32 {
            return Err(anyhow!("token name must be 1..=32 characters"));
        }
        if self.symbol.is_empty() || self.symbol.len() > 10 {
            return Err(anyhow!("token symbol must be 1..=10 characters"));
        }
        if self.metadata_uri.len() > 200 {
            return Err(anyhow!("metadata uri too long"));
        }
        Ok(())
    }
}

/// Builds the launch transaction. Returns the transaction (signed only by the
/// ephemeral mint keypair) and the new mint and pool addresses.
pub async fn build_launch_transaction(
    rpc: &SolanaRpcClient,
    params: &LaunchParams,
    priority_fee: PriorityFee,
) -> Result<(Transaction, Pubkey, Pubkey), anyhow::Error> {
    params.validate()?;

    let mint = Keypair::new();
    let quote_mint = constants::accounts::WSOL_MINT;
    let pool = get_pool_pda(&params.config, &mint.pubkey(), &quote_mint)
        .ok_or_else(|| anyhow!("failed to derive pool address"))?;

    let mut instructions = create_priority_fee_instructions(priority_fee);
    instructions.push(initialize_virtual_pool(
        &params.creator,
        &params.config,
        &pool,
        &mint.pubkey(),
        &quote_mint,
        InitializePool {
            name: params.name.clone(),
            symbol: params.symbol.clone(),
            uri: params.metadata_uri.clone(),
        },
    ));

    let recent_blockhash = rpc.get_latest_blockhash().await?;
    let mut transaction = Transaction::new_with_payer(&instructions, Some(&params.creator));
    transaction.try_partial_sign(&[&mint], recent_blockhash)?;

    Ok((transaction, mint.pubkey(), pool))
}
