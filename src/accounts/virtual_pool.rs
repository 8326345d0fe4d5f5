//! Virtual pool account for the Dynamic Bonding Curve program.
//!
//! Holds the keys and counters the exit builder needs: the fee vaults, the
//! pending creator fees, and the migration flag that gates the leftover
//! withdrawal.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use super::decode_account;

pub const VIRTUAL_POOL_ACCOUNT: &str = "VirtualPool";

#[derive(Debug, Clone, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct VirtualPool {
    /// Pool config account this pool was created from
    pub config: Pubkey,
    /// Wallet that launched the token
    pub creator: Pubkey,
    /// Token being launched
    pub base_mint: Pubkey,
    /// Quote token of the curve (WSOL for SOL-quoted pools)
    pub quote_mint: Pubkey,
    /// Vault holding unsold base tokens
    pub base_vault: Pubkey,
    /// Vault accumulating quote-side proceeds and fees
    pub quote_vault: Pubkey,
    pub base_reserve: u64,
    pub quote_reserve: u64,
    pub protocol_base_fee: u64,
    pub protocol_quote_fee: u64,
    pub partner_base_fee: u64,
    pub partner_quote_fee: u64,
    pub creator_base_fee: u64,
    pub creator_quote_fee: u64,
    /// Nonzero once the curve has completed and liquidity moved to the AMM
    pub is_migrated: u8,
}

impl VirtualPool {
    pub fn decode(data: &[u8]) -> Result<Self, anyhow::Error> {
        decode_account(VIRTUAL_POOL_ACCOUNT, data)
    }

    /// Pending creator fees as (base, quote)
    pub fn claimable_creator_fees(&self) -> (u64, u64) {
        (self.creator_base_fee, self.creator_quote_fee)
    }

    pub fn has_migrated(&self) -> bool {
        self.is_migrated != 0
    }

    /// Base tokens left in the vault after migration, claimable by the creator
    pub fn leftover_base(&self) -> u64 {
        if self.has_migrated() {
            self.base_reserve
        } else {
            0
        }
    }
}
