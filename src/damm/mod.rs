//! Client glue for the DAMM v2 constant-product AMM: PDA derivation,
//! position/pool fetch, and the remove-liquidity transaction builder.

pub mod exit;

pub use exit::{build_remove_liquidity_transaction, RemoveLiquiditySummary};

use anyhow::anyhow;
use solana_sdk::pubkey::Pubkey;

use crate::{
    accounts::{DammPool, DammPosition},
    common::SolanaRpcClient,
    constants,
};

#[inline]
pub fn get_damm_pool_authority_pda() -> Pubkey {
    static POOL_AUTHORITY_PDA: once_cell::sync::Lazy<Pubkey> = once_cell::sync::Lazy::new(|| {
        Pubkey::find_program_address(
            &[constants::seeds::POOL_AUTHORITY_SEED],
            &constants::accounts::DAMM_V2_PROGRAM,
        )
        .0
    });
    *POOL_AUTHORITY_PDA
}

#[inline]
pub fn get_damm_event_authority_pda() -> Pubkey {
    static EVENT_AUTHORITY_PDA: once_cell::sync::Lazy<Pubkey> = once_cell::sync::Lazy::new(|| {
        Pubkey::find_program_address(
            &[constants::seeds::EVENT_AUTHORITY_SEED],
            &constants::accounts::DAMM_V2_PROGRAM,
        )
        .0
    });
    *EVENT_AUTHORITY_PDA
}

#[inline]
pub fn get_position_pda(nft_mint: &Pubkey) -> Option<Pubkey> {
    let seeds: &[&[u8]; 2] = &[constants::seeds::POSITION_SEED, nft_mint.as_ref()];
    let pda = Pubkey::try_find_program_address(seeds, &constants::accounts::DAMM_V2_PROGRAM);
    pda.map(|pubkey| pubkey.0)
}

pub async fn fetch_position(
    rpc: &SolanaRpcClient,
    position_address: &Pubkey,
) -> Result<DammPosition, anyhow::Error> {
    let account = rpc
        .get_account(position_address)
        .await
        .map_err(|e| anyhow!("failed to fetch position {position_address}: {e}"))?;
    if account.owner != constants::accounts::DAMM_V2_PROGRAM {
        return Err(anyhow!(
            "{position_address} is not owned by the DAMM v2 program"
        ));
    }
    DammPosition::decode(&account.data)
}

pub async fn fetch_damm_pool(
    rpc: &SolanaRpcClient,
    pool_address: &Pubkey,
) -> Result<DammPool, anyhow::Error> {
    let account = rpc
        .get_account(pool_address)
        .await
        .map_err(|e| anyhow!("failed to fetch pool {pool_address}: {e}"))?;
    if account.owner != constants::accounts::DAMM_V2_PROGRAM {
        return Err(anyhow!("{pool_address} is not owned by the DAMM v2 program"));
    }
    DammPool::decode(&account.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorities_differ_between_programs() {
        assert_ne!(
            get_damm_pool_authority_pda(),
            crate::dbc::get_dbc_pool_authority_pda()
        );
    }

    #[test]
    fn position_pda_tracks_nft_mint() {
        let a = get_position_pda(&Pubkey::new_unique()).unwrap();
        let b = get_position_pda(&Pubkey::new_unique()).unwrap();
        assert_ne!(a, b);
    }
}
