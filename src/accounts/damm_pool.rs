//! DAMM v2 pool account: the keys the remove-liquidity builder needs.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use super::decode_account;
use crate::constants::accounts::{TOKEN_2022_PROGRAM, TOKEN_PROGRAM};

pub const DAMM_POOL_ACCOUNT: &str = "Pool";

#[derive(Debug, Clone, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct DammPool {
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub token_a_vault: Pubkey,
    pub token_b_vault: Pubkey,
    /// 0 = spl-token, 1 = token-2022
    pub token_a_flag: u8,
    pub token_b_flag: u8,
    pub liquidity: u128,
}

impl DammPool {
    pub fn decode(data: &[u8]) -> Result<Self, anyhow::Error> {
        decode_account(DAMM_POOL_ACCOUNT, data)
    }

    pub fn token_a_program(&self) -> Pubkey {
        token_program_for(self.token_a_flag)
    }

    pub fn token_b_program(&self) -> Pubkey {
        token_program_for(self.token_b_flag)
    }
}

fn token_program_for(flag: u8) -> Pubkey {
    if flag == 1 {
        TOKEN_2022_PROGRAM
    } else {
        TOKEN_PROGRAM
    }
}

#[cfg(test)]
mod tests {
    use super::super::encode_account;
    use super::*;

    #[test]
    fn decodes_and_maps_token_programs() {
        let pool = DammPool {
            token_a_mint: Pubkey::new_unique(),
            token_b_mint: Pubkey::new_unique(),
            token_a_vault: Pubkey::new_unique(),
            token_b_vault: Pubkey::new_unique(),
            token_a_flag: 1,
            token_b_flag: 0,
            liquidity: 42,
        };
        let data = encode_account(DAMM_POOL_ACCOUNT, &pool);
        let decoded = DammPool::decode(&data).unwrap();
        assert_eq!(decoded.token_a_program(), TOKEN_2022_PROGRAM);
        assert_eq!(decoded.token_b_program(), TOKEN_PROGRAM);
        assert_eq!(decoded.liquidity, 42);
    }
}
