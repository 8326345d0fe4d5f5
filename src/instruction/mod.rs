//! Instructions for interacting with the DBC and DAMM v2 programs.
//!
//! This module contains instruction builders that assemble properly formatted
//! Solana instructions from discovered account state. Each builder takes the
//! required accounts and instruction data and returns an [`Instruction`]
//! against the fixed program IDs in [`crate::constants::accounts`].
//!
//! # Instructions
//!
//! - `initialize_virtual_pool`: launch a token on a fresh bonding-curve pool.
//! - `claim_creator_trading_fee`: move pending creator fees out of the pool
//!   vaults.
//! - `withdraw_leftover`: recover unsold base tokens after migration.
//! - `claim_position_fee` / `remove_liquidity`: the DAMM v2 exit pair.

pub mod discriminator;

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use spl_associated_token_account::get_associated_token_address;

use crate::{
    constants,
    damm::{get_damm_event_authority_pda, get_damm_pool_authority_pda},
    dbc::{get_dbc_event_authority_pda, get_dbc_pool_authority_pda},
};
use discriminator::resolve_instruction;

fn append_str(data: &mut Vec<u8>, value: &str) {
    data.extend_from_slice(&(value.len() as u32).to_le_bytes());
    data.extend_from_slice(value.as_bytes());
}

pub struct InitializePool {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

impl InitializePool {
    pub fn data(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(8 + 12 + self.name.len() + self.symbol.len() + self.uri.len());
        data.extend_from_slice(&resolve_instruction("initialize_virtual_pool"));
        append_str(&mut data, &self.name);
        append_str(&mut data, &self.symbol);
        append_str(&mut data, &self.uri);
        data
    }
}

pub struct ClaimCreatorTradingFee {
    pub max_base_amount: u64,
    pub max_quote_amount: u64,
}

impl ClaimCreatorTradingFee {
    pub fn data(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(8 + 8 + 8);
        data.extend_from_slice(&resolve_instruction("claim_creator_trading_fee"));
        data.extend_from_slice(&self.max_base_amount.to_le_bytes());
        data.extend_from_slice(&self.max_quote_amount.to_le_bytes());
        data
    }
}

pub struct RemoveLiquidity {
    pub liquidity_delta: u128,
    pub token_a_amount_threshold: u64,
    pub token_b_amount_threshold: u64,
}

impl RemoveLiquidity {
    pub fn data(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(8 + 16 + 8 + 8);
        data.extend_from_slice(&resolve_instruction("remove_liquidity"));
        data.extend_from_slice(&self.liquidity_delta.to_le_bytes());
        data.extend_from_slice(&self.token_a_amount_threshold.to_le_bytes());
        data.extend_from_slice(&self.token_b_amount_threshold.to_le_bytes());
        data
    }
}

/// Creates the instruction that launches a token on a fresh virtual pool.
///
/// The base mint is a new keypair signing alongside the creator; the pool and
/// its vaults are derived from the config and the mint pair.
pub fn initialize_virtual_pool(
    creator: &Pubkey,
    config: &Pubkey,
    pool: &Pubkey,
    base_mint: &Pubkey,
    quote_mint: &Pubkey,
    args: InitializePool,
) -> Instruction {
    let pool_authority = get_dbc_pool_authority_pda();
    Instruction::new_with_bytes(
        constants::accounts::DBC_PROGRAM,
        &args.data(),
        vec![
            AccountMeta::new_readonly(*config, false),
            AccountMeta::new_readonly(pool_authority, false),
            AccountMeta::new(*pool, false),
            AccountMeta::new(*base_mint, true),
            AccountMeta::new_readonly(*quote_mint, false),
            AccountMeta::new(get_associated_token_address(&pool_authority, base_mint), false),
            AccountMeta::new(get_associated_token_address(&pool_authority, quote_mint), false),
            AccountMeta::new(*creator, true),
            AccountMeta::new_readonly(constants::accounts::TOKEN_PROGRAM, false),
            AccountMeta::new_readonly(constants::accounts::ASSOCIATED_TOKEN_PROGRAM, false),
            AccountMeta::new_readonly(constants::accounts::SYSTEM_PROGRAM, false),
            AccountMeta::new_readonly(get_dbc_event_authority_pda(), false),
            AccountMeta::new_readonly(constants::accounts::DBC_PROGRAM, false),
        ],
    )
}

/// Creates the instruction that claims pending creator trading fees.
///
/// Fees accrue on both legs of the curve; `args` caps how much of each leg is
/// taken. Receiver token accounts must exist before this executes, so the
/// exit builder pairs it with idempotent ATA creation.
pub fn claim_creator_trading_fee(
    creator: &Pubkey,
    pool: &Pubkey,
    config: &Pubkey,
    base_mint: &Pubkey,
    quote_mint: &Pubkey,
    base_vault: &Pubkey,
    quote_vault: &Pubkey,
    receiver_base_ata: &Pubkey,
    receiver_quote_ata: &Pubkey,
    args: ClaimCreatorTradingFee,
) -> Instruction {
    Instruction::new_with_bytes(
        constants::accounts::DBC_PROGRAM,
        &args.data(),
        vec![
            AccountMeta::new_readonly(get_dbc_pool_authority_pda(), false),
            AccountMeta::new_readonly(*config, false),
            AccountMeta::new(*pool, false),
            AccountMeta::new(*base_vault, false),
            AccountMeta::new(*quote_vault, false),
            AccountMeta::new_readonly(*base_mint, false),
            AccountMeta::new_readonly(*quote_mint, false),
            AccountMeta::new(*receiver_base_ata, false),
            AccountMeta::new(*receiver_quote_ata, false),
            AccountMeta::new(*creator, true),
            AccountMeta::new_readonly(constants::accounts::TOKEN_PROGRAM, false),
            AccountMeta::new_readonly(get_dbc_event_authority_pda(), false),
            AccountMeta::new_readonly(constants::accounts::DBC_PROGRAM, false),
        ],
    )
}

/// Creates the instruction that withdraws unsold base tokens after the curve
/// has migrated to the AMM. Only the pool creator may execute it.
pub fn withdraw_leftover(
    creator: &Pubkey,
    pool: &Pubkey,
    config: &Pubkey,
    base_mint: &Pubkey,
    base_vault: &Pubkey,
    receiver_base_ata: &Pubkey,
) -> Instruction {
    Instruction::new_with_bytes(
        constants::accounts::DBC_PROGRAM,
        &resolve_instruction("withdraw_leftover"),
        vec![
            AccountMeta::new_readonly(get_dbc_pool_authority_pda(), false),
            AccountMeta::new_readonly(*config, false),
            AccountMeta::new(*pool, false),
            AccountMeta::new(*base_vault, false),
            AccountMeta::new_readonly(*base_mint, false),
            AccountMeta::new(*receiver_base_ata, false),
            AccountMeta::new(*creator, true),
            AccountMeta::new_readonly(constants::accounts::TOKEN_PROGRAM, false),
            AccountMeta::new_readonly(get_dbc_event_authority_pda(), false),
            AccountMeta::new_readonly(constants::accounts::DBC_PROGRAM, false),
        ],
    )
}

/// Accounts shared by the two DAMM v2 position instructions.
pub struct DammPositionAccounts {
    pub owner: Pubkey,
    pub pool: Pubkey,
    pub position: Pubkey,
    /// Token account holding the position NFT
    pub position_nft_account: Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub token_a_vault: Pubkey,
    pub token_b_vault: Pubkey,
    pub owner_token_a_ata: Pubkey,
    pub owner_token_b_ata: Pubkey,
    pub token_a_program: Pubkey,
    pub token_b_program: Pubkey,
}

impl DammPositionAccounts {
    fn metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new_readonly(get_damm_pool_authority_pda(), false),
            AccountMeta::new(self.pool, false),
            AccountMeta::new(self.position, false),
            AccountMeta::new(self.token_a_vault, false),
            AccountMeta::new(self.token_b_vault, false),
            AccountMeta::new(self.owner_token_a_ata, false),
            AccountMeta::new(self.owner_token_b_ata, false),
            AccountMeta::new_readonly(self.token_a_mint, false),
            AccountMeta::new_readonly(self.token_b_mint, false),
            AccountMeta::new_readonly(self.position_nft_account, false),
            AccountMeta::new(self.owner, true),
            AccountMeta::new_readonly(self.token_a_program, false),
            AccountMeta::new_readonly(self.token_b_program, false),
            AccountMeta::new_readonly(get_damm_event_authority_pda(), false),
            AccountMeta::new_readonly(constants::accounts::DAMM_V2_PROGRAM, false),
        ]
    }
}

/// Creates the instruction that claims accumulated swap fees on a position.
pub fn claim_position_fee(accounts: &DammPositionAccounts) -> Instruction {
    Instruction::new_with_bytes(
        constants::accounts::DAMM_V2_PROGRAM,
        &resolve_instruction("claim_position_fee"),
        accounts.metas(),
    )
}

/// Creates the instruction that removes liquidity from a position.
pub fn remove_liquidity(accounts: &DammPositionAccounts, args: RemoveLiquidity) -> Instruction {
    Instruction::new_with_bytes(
        constants::accounts::DAMM_V2_PROGRAM,
        &args.data(),
        accounts.metas(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::discriminator::anchor_instruction;

    fn damm_accounts() -> DammPositionAccounts {
        DammPositionAccounts {
            owner: Pubkey::new_unique(),
            pool: Pubkey::new_unique(),
            position: Pubkey::new_unique(),
            position_nft_account: Pubkey::new_unique(),
            token_a_mint: Pubkey::new_unique(),
            token_b_mint: Pubkey::new_unique(),
            token_a_vault: Pubkey::new_unique(),
            token_b_vault: Pubkey::new_unique(),
            owner_token_a_ata: Pubkey::new_unique(),
            owner_token_b_ata: Pubkey::new_unique(),
            token_a_program: constants::accounts::TOKEN_PROGRAM,
            token_b_program: constants::accounts::TOKEN_PROGRAM,
        }
    }

    #[test]
    fn claim_fee_data_layout() {
        let args = ClaimCreatorTradingFee {
            max_base_amount: 7,
            max_quote_amount: u64::MAX,
        };
        let data = args.data();
        assert_eq!(data.len(), 24);
        assert_eq!(&data[..8], &anchor_instruction("claim_creator_trading_fee"));
        assert_eq!(&data[8..16], &7u64.to_le_bytes());
        assert_eq!(&data[16..24], &u64::MAX.to_le_bytes());
    }

    #[test]
    fn initialize_pool_data_encodes_strings() {
        let args = InitializePool {
            name: "Token".to_string(),
            symbol: "TKN".to_string(),
            uri: "https://example.com/meta.json".to_string(),
        };
        let data = args.data();
        assert_eq!(&data[..8], &anchor_instruction("initialize_virtual_pool"));
        assert_eq!(&data[8..12], &5u32.to_le_bytes());
        assert_eq!(&data[12..17], b"Token");
        assert_eq!(&data[17..21], &3u32.to_le_bytes());
    }

    #[test]
    fn claim_fee_signer_is_creator() {
        let creator = Pubkey::new_unique();
        let ix = claim_creator_trading_fee(
            &creator,
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            ClaimCreatorTradingFee {
                max_base_amount: u64::MAX,
                max_quote_amount: u64::MAX,
            },
        );
        assert_eq!(ix.program_id, constants::accounts::DBC_PROGRAM);
        let signers: Vec<_> = ix.accounts.iter().filter(|m| m.is_signer).collect();
        assert_eq!(signers.len(), 1);
        assert_eq!(signers[0].pubkey, creator);
    }

    #[test]
    fn remove_liquidity_data_layout() {
        let args = RemoveLiquidity {
            liquidity_delta: 1u128 << 80,
            token_a_amount_threshold: 1,
            token_b_amount_threshold: 2,
        };
        let data = args.data();
        assert_eq!(data.len(), 40);
        assert_eq!(&data[..8], &anchor_instruction("remove_liquidity"));
        assert_eq!(&data[8..24], &(1u128 << 80).to_le_bytes());
    }

    #[test]
    fn damm_instructions_share_account_shape() {
        let accounts = damm_accounts();
        let claim = claim_position_fee(&accounts);
        let remove = remove_liquidity(
            &accounts,
            RemoveLiquidity {
                liquidity_delta: 1,
                token_a_amount_threshold: 0,
                token_b_amount_threshold: 0,
            },
        );
        assert_eq!(claim.accounts.len(), remove.accounts.len());
        assert_eq!(claim.program_id, constants::accounts::DAMM_V2_PROGRAM);
        assert!(claim.accounts.iter().any(|m| m.pubkey == accounts.owner && m.is_signer));
    }
}
