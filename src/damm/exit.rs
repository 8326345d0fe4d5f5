//! Remove-liquidity assembly for DAMM v2 positions.
//!
//! Locates the position and its pool on-chain, then assembles: idempotent ATA
//! creation for both legs, the pending-fee claim, and the liquidity removal
//! itself. The liquidity-to-amount conversion is owned by the on-chain
//! program; thresholds are the caller's slippage floor on each leg.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, transaction::Transaction};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account_idempotent,
};

use crate::{
    accounts::{DammPool, DammPosition},
    common::{create_priority_fee_instructions, PriorityFee, SolanaRpcClient},
    instruction::{claim_position_fee, remove_liquidity, DammPositionAccounts, RemoveLiquidity},
};

use super::{fetch_damm_pool, fetch_position};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveLiquiditySummary {
    pub pool: Pubkey,
    pub liquidity_removed: u128,
    pub fee_a_claimed: u64,
    pub fee_b_claimed: u64,
}

/// Builds the unsigned transaction removing `percent` of the position's
/// liquidity and claiming its pending fees. Fee payer = `owner`, who must
/// hold the position NFT.
pub async fn build_remove_liquidity_transaction(
    rpc: &SolanaRpcClient,
    position_address: &Pubkey,
    owner: &Pubkey,
    percent: u64,
    token_a_amount_threshold: u64,
    token_b_amount_threshold: u64,
    priority_fee: PriorityFee,
) -> Result<(Transaction, RemoveLiquiditySummary), anyhow::Error> {
    if percent == 0 || percent > 100 {
        return Err(anyhow!("percent must be between 1 and 100"));
    }

    let position = fetch_position(rpc, position_address).await?;
    if position.is_empty() {
        return Err(anyhow!("position {position_address} has nothing to remove"));
    }
    let pool = fetch_damm_pool(rpc, &position.pool).await?;

    let (instructions, summary) = build_remove_liquidity_instructions(
        &position,
        &pool,
        position_address,
        owner,
        percent,
        token_a_amount_threshold,
        token_b_amount_threshold,
        priority_fee,
    );

    let recent_blockhash = rpc.get_latest_blockhash().await?;
    let mut transaction = Transaction::new_with_payer(&instructions, Some(owner));
    transaction.message.recent_blockhash = recent_blockhash;

    Ok((transaction, summary))
}

#[allow(clippy::too_many_arguments)]
fn build_remove_liquidity_instructions(
    position: &DammPosition,
    pool: &DammPool,
    position_address: &Pubkey,
    owner: &Pubkey,
    percent: u64,
    token_a_amount_threshold: u64,
    token_b_amount_threshold: u64,
    priority_fee: PriorityFee,
) -> (Vec<Instruction>, RemoveLiquiditySummary) {
    let mut instructions = create_priority_fee_instructions(priority_fee);

    instructions.push(create_associated_token_account_idempotent(
        owner,
        owner,
        &pool.token_a_mint,
        &pool.token_a_program(),
    ));
    instructions.push(create_associated_token_account_idempotent(
        owner,
        owner,
        &pool.token_b_mint,
        &pool.token_b_program(),
    ));

    let accounts = DammPositionAccounts {
        owner: *owner,
        pool: position.pool,
        position: *position_address,
        position_nft_account: get_associated_token_address(owner, &position.nft_mint),
        token_a_mint: pool.token_a_mint,
        token_b_mint: pool.token_b_mint,
        token_a_vault: pool.token_a_vault,
        token_b_vault: pool.token_b_vault,
        owner_token_a_ata: get_associated_token_address(owner, &pool.token_a_mint),
        owner_token_b_ata: get_associated_token_address(owner, &pool.token_b_mint),
        token_a_program: pool.token_a_program(),
        token_b_program: pool.token_b_program(),
    };

    if position.fee_a_pending > 0 || position.fee_b_pending > 0 {
        instructions.push(claim_position_fee(&accounts));
    }

    // floor(liquidity * percent / 100) without overflowing u128
    let percent = percent as u128;
    let liquidity_delta =
        position.liquidity / 100 * percent + position.liquidity % 100 * percent / 100;
    if liquidity_delta > 0 {
        instructions.push(remove_liquidity(
            &accounts,
            RemoveLiquidity {
                liquidity_delta,
                token_a_amount_threshold,
                token_b_amount_threshold,
            },
        ));
    }

    let summary = RemoveLiquiditySummary {
        pool: position.pool,
        liquidity_removed: liquidity_delta,
        fee_a_claimed: position.fee_a_pending,
        fee_b_claimed: position.fee_b_pending,
    };

    (instructions, summary)
}

#[cfg(test)]
mod tests {
    use crate::constants;

    use super::*;

    fn position_and_pool() -> (DammPosition, DammPool) {
        let pool_address = Pubkey::new_unique();
        let position = DammPosition {
            pool: pool_address,
            nft_mint: Pubkey::new_unique(),
            liquidity: 1_000_000,
            fee_a_pending: 10,
            fee_b_pending: 0,
        };
        let pool = DammPool {
            token_a_mint: Pubkey::new_unique(),
            token_b_mint: constants::accounts::WSOL_MINT,
            token_a_vault: Pubkey::new_unique(),
            token_b_vault: Pubkey::new_unique(),
            token_a_flag: 0,
            token_b_flag: 0,
            liquidity: 5_000_000,
        };
        (position, pool)
    }

    #[test]
    fn full_exit_has_claim_and_removal() {
        let (position, pool) = position_and_pool();
        let owner = Pubkey::new_unique();
        let (ixs, summary) = build_remove_liquidity_instructions(
            &position,
            &pool,
            &Pubkey::new_unique(),
            &owner,
            100,
            0,
            0,
            PriorityFee::default(),
        );
        // 2 compute budget + 2 ata + claim + remove
        assert_eq!(ixs.len(), 6);
        assert_eq!(summary.liquidity_removed, 1_000_000);
        assert_eq!(summary.fee_a_claimed, 10);
    }

    #[test]
    fn partial_exit_scales_liquidity() {
        let (position, pool) = position_and_pool();
        let (_, summary) = build_remove_liquidity_instructions(
            &position,
            &pool,
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            25,
            0,
            0,
            PriorityFee::default(),
        );
        assert_eq!(summary.liquidity_removed, 250_000);
    }

    #[test]
    fn full_exit_is_exact_for_odd_liquidity() {
        let (mut position, pool) = position_and_pool();
        position.liquidity = u128::MAX - 7;
        let (_, summary) = build_remove_liquidity_instructions(
            &position,
            &pool,
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            100,
            0,
            0,
            PriorityFee::default(),
        );
        assert_eq!(summary.liquidity_removed, u128::MAX - 7);
    }

    #[test]
    fn fee_only_position_skips_removal() {
        let (mut position, pool) = position_and_pool();
        position.liquidity = 0;
        let (ixs, summary) = build_remove_liquidity_instructions(
            &position,
            &pool,
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            100,
            0,
            0,
            PriorityFee::default(),
        );
        // 2 compute budget + 2 ata + claim, no remove_liquidity
        assert_eq!(ixs.len(), 5);
        assert_eq!(summary.liquidity_removed, 0);
    }
}
