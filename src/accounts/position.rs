//! DAMM v2 position account: a liquidity position owned through an NFT.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use super::decode_account;

pub const POSITION_ACCOUNT: &str = "Position";

#[derive(Debug, Clone, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct DammPosition {
    /// Pool this position provides liquidity to
    pub pool: Pubkey,
    /// NFT mint whose holder owns the position
    pub nft_mint: Pubkey,
    pub liquidity: u128,
    pub fee_a_pending: u64,
    pub fee_b_pending: u64,
}

impl DammPosition {
    pub fn decode(data: &[u8]) -> Result<Self, anyhow::Error> {
        decode_account(POSITION_ACCOUNT, data)
    }

    pub fn is_empty(&self) -> bool {
        self.liquidity == 0 && self.fee_a_pending == 0 && self.fee_b_pending == 0
    }
}
