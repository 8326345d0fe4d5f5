//! One-click exit: claim pending creator fees and, once the curve has
//! migrated, withdraw the leftover base tokens, all in one unsigned
//! transaction for the creator's wallet to sign.

use std::fmt;

use serde::{Deserialize, Serialize};
use solana_sdk::{
    instruction::Instruction, pubkey::Pubkey, system_instruction, transaction::Transaction,
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account_idempotent,
};

use crate::{
    accounts::VirtualPool,
    common::{
        create_priority_fee_instructions,
        fees::{FeeSplit, FeeSplitConfig},
        PriorityFee, SolanaRpcClient,
    },
    constants,
    instruction::{claim_creator_trading_fee, withdraw_leftover, ClaimCreatorTradingFee},
};

use super::fetch_pool;

/// Rejections caused by pool/wallet state rather than infrastructure. The
/// API layer maps these to client errors.
#[derive(Debug, PartialEq, Eq)]
pub enum ExitError {
    NotCreator { creator: Pubkey },
    NothingToClaim { pool: Pubkey },
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitError::NotCreator { creator } => {
                write!(f, "only the pool creator {creator} can exit this pool")
            }
            ExitError::NothingToClaim { pool } => {
                write!(f, "nothing to claim on pool {pool}")
            }
        }
    }
}

impl std::error::Error for ExitError {}

/// What an exit would move, quoted from current pool state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitQuote {
    pub claimable_base: u64,
    pub claimable_quote: u64,
    pub leftover_base: u64,
    pub migrated: bool,
    /// Split of the quote-side claim between creator and platform. The
    /// platform leg is zero whenever the built transaction would not move it.
    pub creator_quote: u64,
    pub platform_quote: u64,
}

/// Quotes an exit without building anything.
///
/// The platform share is settled in lamports, so it only applies when a
/// platform wallet is configured and the pool is SOL-quoted; otherwise the
/// whole quote-side claim stays with the creator, matching the transaction
/// the builder produces.
pub fn quote_exit(
    pool: &VirtualPool,
    fee_split: &FeeSplitConfig,
    platform_fee_wallet: Option<&Pubkey>,
) -> ExitQuote {
    let (claimable_base, claimable_quote) = pool.claimable_creator_fees();
    let platform_active =
        platform_fee_wallet.is_some() && pool.quote_mint == constants::accounts::WSOL_MINT;
    let FeeSplit { creator, platform } = if platform_active {
        fee_split.split(claimable_quote)
    } else {
        FeeSplit {
            creator: claimable_quote,
            platform: 0,
        }
    };
    ExitQuote {
        claimable_base,
        claimable_quote,
        leftover_base: pool.leftover_base(),
        migrated: pool.has_migrated(),
        creator_quote: creator,
        platform_quote: platform,
    }
}

fn check_exit(
    pool: &VirtualPool,
    receiver: &Pubkey,
    quote: &ExitQuote,
    pool_address: &Pubkey,
) -> Result<(), ExitError> {
    if pool.creator != *receiver {
        return Err(ExitError::NotCreator {
            creator: pool.creator,
        });
    }
    if quote.claimable_base == 0 && quote.claimable_quote == 0 && quote.leftover_base == 0 {
        return Err(ExitError::NothingToClaim {
            pool: *pool_address,
        });
    }
    Ok(())
}

/// Builds the unsigned exit transaction for `receiver`, who must be the pool
/// creator (the claim instruction requires the creator's signature).
///
/// The transaction: compute budget, idempotent ATA creation for both legs,
/// the fee claim, the leftover withdrawal when migrated, and the platform
/// fee-split transfer when the quote reports one.
pub async fn build_exit_transaction(
    rpc: &SolanaRpcClient,
    pool_address: &Pubkey,
    receiver: &Pubkey,
    fee_split: &FeeSplitConfig,
    platform_fee_wallet: Option<&Pubkey>,
    priority_fee: PriorityFee,
) -> Result<(Transaction, ExitQuote), anyhow::Error> {
    let pool = fetch_pool(rpc, pool_address).await?;
    let quote = quote_exit(&pool, fee_split, platform_fee_wallet);
    check_exit(&pool, receiver, &quote, pool_address).map_err(anyhow::Error::from)?;

    let instructions = build_exit_instructions(
        &pool,
        pool_address,
        receiver,
        &quote,
        platform_fee_wallet,
        priority_fee,
    );

    let recent_blockhash = rpc.get_latest_blockhash().await?;
    let mut transaction = Transaction::new_with_payer(&instructions, Some(receiver));
    transaction.message.recent_blockhash = recent_blockhash;

    Ok((transaction, quote))
}

fn build_exit_instructions(
    pool: &VirtualPool,
    pool_address: &Pubkey,
    receiver: &Pubkey,
    quote: &ExitQuote,
    platform_fee_wallet: Option<&Pubkey>,
    priority_fee: PriorityFee,
) -> Vec<Instruction> {
    let mut instructions = create_priority_fee_instructions(priority_fee);

    instructions.push(create_associated_token_account_idempotent(
        receiver,
        receiver,
        &pool.base_mint,
        &constants::accounts::TOKEN_PROGRAM,
    ));
    instructions.push(create_associated_token_account_idempotent(
        receiver,
        receiver,
        &pool.quote_mint,
        &constants::accounts::TOKEN_PROGRAM,
    ));

    let receiver_base_ata = get_associated_token_address(receiver, &pool.base_mint);
    let receiver_quote_ata = get_associated_token_address(receiver, &pool.quote_mint);

    if quote.claimable_base > 0 || quote.claimable_quote > 0 {
        instructions.push(claim_creator_trading_fee(
            receiver,
            pool_address,
            &pool.config,
            &pool.base_mint,
            &pool.quote_mint,
            &pool.base_vault,
            &pool.quote_vault,
            &receiver_base_ata,
            &receiver_quote_ata,
            ClaimCreatorTradingFee {
                max_base_amount: u64::MAX,
                max_quote_amount: u64::MAX,
            },
        ));
    }

    if quote.migrated && quote.leftover_base > 0 {
        instructions.push(withdraw_leftover(
            receiver,
            pool_address,
            &pool.config,
            &pool.base_mint,
            &pool.base_vault,
            &receiver_base_ata,
        ));
    }

    // A nonzero platform leg in the quote already implies a configured
    // wallet and a SOL-quoted pool.
    if let Some(platform_wallet) = platform_fee_wallet {
        if quote.platform_quote > 0 {
            instructions.push(system_instruction::transfer(
                receiver,
                platform_wallet,
                quote.platform_quote,
            ));
        }
    }

    instructions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_with_fees(creator: Pubkey, migrated: bool) -> VirtualPool {
        VirtualPool {
            config: Pubkey::new_unique(),
            creator,
            base_mint: Pubkey::new_unique(),
            quote_mint: constants::accounts::WSOL_MINT,
            base_vault: Pubkey::new_unique(),
            quote_vault: Pubkey::new_unique(),
            base_reserve: 500,
            quote_reserve: 0,
            protocol_base_fee: 0,
            protocol_quote_fee: 0,
            partner_base_fee: 0,
            partner_quote_fee: 0,
            creator_base_fee: 100,
            creator_quote_fee: 1_000_000,
            is_migrated: migrated as u8,
        }
    }

    fn count_system_transfers(ixs: &[Instruction]) -> usize {
        ixs.iter()
            .filter(|ix| ix.program_id == constants::accounts::SYSTEM_PROGRAM)
            .count()
    }

    #[test]
    fn quote_splits_quote_leg() {
        let pool = pool_with_fees(Pubkey::new_unique(), false);
        let platform = Pubkey::new_unique();
        let split = FeeSplitConfig::new(500).unwrap();
        let quote = quote_exit(&pool, &split, Some(&platform));
        assert_eq!(quote.claimable_quote, 1_000_000);
        assert_eq!(quote.platform_quote, 50_000);
        assert_eq!(quote.creator_quote, 950_000);
        assert_eq!(quote.leftover_base, 0);
        assert!(!quote.migrated);
    }

    #[test]
    fn quote_without_platform_wallet_keeps_creator_whole() {
        let pool = pool_with_fees(Pubkey::new_unique(), false);
        let split = FeeSplitConfig::new(500).unwrap();
        let quote = quote_exit(&pool, &split, None);
        assert_eq!(quote.platform_quote, 0);
        assert_eq!(quote.creator_quote, 1_000_000);
    }

    #[test]
    fn unmigrated_exit_skips_leftover_withdrawal() {
        let creator = Pubkey::new_unique();
        let pool = pool_with_fees(creator, false);
        let split = FeeSplitConfig::new(0).unwrap();
        let quote = quote_exit(&pool, &split, None);

        let ixs = build_exit_instructions(
            &pool,
            &Pubkey::new_unique(),
            &creator,
            &quote,
            None,
            PriorityFee::default(),
        );
        // 2 compute budget + 2 ata + claim
        assert_eq!(ixs.len(), 5);
        assert_eq!(count_system_transfers(&ixs), 0);
    }

    #[test]
    fn migrated_exit_adds_withdrawal_and_platform_transfer() {
        let creator = Pubkey::new_unique();
        let platform = Pubkey::new_unique();
        let pool = pool_with_fees(creator, true);
        let split = FeeSplitConfig::new(500).unwrap();
        let quote = quote_exit(&pool, &split, Some(&platform));

        let ixs = build_exit_instructions(
            &pool,
            &Pubkey::new_unique(),
            &creator,
            &quote,
            Some(&platform),
            PriorityFee::default(),
        );
        // 2 compute budget + 2 ata + claim + withdraw + platform transfer
        assert_eq!(ixs.len(), 7);
        let transfer = ixs.last().unwrap();
        assert_eq!(transfer.program_id, constants::accounts::SYSTEM_PROGRAM);
        assert!(transfer.accounts.iter().any(|m| m.pubkey == platform));
    }

    #[test]
    fn token_quoted_pool_quote_matches_instructions() {
        let creator = Pubkey::new_unique();
        let platform = Pubkey::new_unique();
        let mut pool = pool_with_fees(creator, false);
        pool.quote_mint = Pubkey::new_unique();
        let split = FeeSplitConfig::new(500).unwrap();

        let quote = quote_exit(&pool, &split, Some(&platform));
        // No transfer will be appended, so the quote must not report a
        // platform share either.
        assert_eq!(quote.platform_quote, 0);
        assert_eq!(quote.creator_quote, quote.claimable_quote);

        let ixs = build_exit_instructions(
            &pool,
            &Pubkey::new_unique(),
            &creator,
            &quote,
            Some(&platform),
            PriorityFee::default(),
        );
        assert_eq!(ixs.len(), 5);
        assert_eq!(count_system_transfers(&ixs), 0);
    }

    #[test]
    fn rejects_non_creator_and_empty_pools() {
        let creator = Pubkey::new_unique();
        let pool_address = Pubkey::new_unique();
        let pool = pool_with_fees(creator, false);
        let split = FeeSplitConfig::new(500).unwrap();
        let quote = quote_exit(&pool, &split, None);

        let stranger = Pubkey::new_unique();
        assert_eq!(
            check_exit(&pool, &stranger, &quote, &pool_address),
            Err(ExitError::NotCreator { creator })
        );

        let mut drained = pool.clone();
        drained.creator_base_fee = 0;
        drained.creator_quote_fee = 0;
        let quote = quote_exit(&drained, &split, None);
        assert_eq!(
            check_exit(&drained, &creator, &quote, &pool_address),
            Err(ExitError::NothingToClaim { pool: pool_address })
        );

        let quote = quote_exit(&pool, &split, None);
        assert!(check_exit(&pool, &creator, &quote, &pool_address).is_ok());
    }

    #[test]
    fn exit_errors_downcast_through_anyhow() {
        let err: anyhow::Error = ExitError::NothingToClaim {
            pool: Pubkey::new_unique(),
        }
        .into();
        assert!(err.downcast_ref::<ExitError>().is_some());
    }
}
