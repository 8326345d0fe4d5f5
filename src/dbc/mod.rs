//! Client glue for the Dynamic Bonding Curve program: PDA derivation, pool
//! fetch + decode, and the exit/launch transaction builders.

pub mod exit;
pub mod launch;

pub use exit::{build_exit_transaction, quote_exit, ExitError, ExitQuote};
pub use launch::{build_launch_transaction, LaunchParams};

use anyhow::anyhow;
use solana_sdk::pubkey::Pubkey;

use crate::{accounts::VirtualPool, common::SolanaRpcClient, constants};

#[inline]
pub fn get_dbc_pool_authority_pda() -> Pubkey {
    static POOL_AUTHORITY_PDA: once_cell::sync::Lazy<Pubkey> = once_cell::sync::Lazy::new(|| {
        Pubkey::find_program_address(
            &[constants::seeds::POOL_AUTHORITY_SEED],
            &constants::accounts::DBC_PROGRAM,
        )
        .0
    });
    *POOL_AUTHORITY_PDA
}

#[inline]
pub fn get_dbc_event_authority_pda() -> Pubkey {
    static EVENT_AUTHORITY_PDA: once_cell::sync::Lazy<Pubkey> = once_cell::sync::Lazy::new(|| {
        Pubkey::find_program_address(
            &[constants::seeds::EVENT_AUTHORITY_SEED],
            &constants::accounts::DBC_PROGRAM,
        )
        .0
    });
    *EVENT_AUTHORITY_PDA
}

#[inline]
pub fn get_pool_pda(config: &Pubkey, base_mint: &Pubkey, quote_mint: &Pubkey) -> Option<Pubkey> {
    let seeds: &[&[u8]; 4] = &[
        constants::seeds::POOL_SEED,
        config.as_ref(),
        base_mint.as_ref(),
        quote_mint.as_ref(),
    ];
    let pda = Pubkey::try_find_program_address(seeds, &constants::accounts::DBC_PROGRAM);
    pda.map(|pubkey| pubkey.0)
}

/// Fetches and decodes a virtual pool account.
pub async fn fetch_pool(
    rpc: &SolanaRpcClient,
    pool_address: &Pubkey,
) -> Result<VirtualPool, anyhow::Error> {
    let account = rpc
        .get_account(pool_address)
        .await
        .map_err(|e| anyhow!("failed to fetch pool {pool_address}: {e}"))?;
    if account.owner != constants::accounts::DBC_PROGRAM {
        return Err(anyhow!(
            "{pool_address} is not owned by the DBC program"
        ));
    }
    VirtualPool::decode(&account.data)
}
