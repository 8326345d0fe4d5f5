//! Decoded on-chain account layouts.
//!
//! Exit transactions are assembled from discovered on-chain state: the DBC
//! virtual pool (fee vaults, migration flag) and the DAMM v2 position and
//! pool (liquidity, pending fees, vault keys). Each layout validates the
//! 8-byte account discriminator before decoding the borsh body.

mod damm_pool;
mod position;
mod virtual_pool;

pub use damm_pool::DammPool;
pub use position::DammPosition;
pub use virtual_pool::VirtualPool;

use anyhow::anyhow;
use borsh::BorshDeserialize;

use crate::instruction::discriminator::anchor_account;

/// Strips and checks the account discriminator, then borsh-decodes the body.
/// Trailing padding bytes are tolerated, short or foreign data is not.
pub(crate) fn decode_account<T: BorshDeserialize>(
    account_name: &str,
    data: &[u8],
) -> Result<T, anyhow::Error> {
    if data.len() < 8 {
        return Err(anyhow!(
            "{account_name} account data too short: {} bytes",
            data.len()
        ));
    }
    let expected = anchor_account(account_name);
    if data[..8] != expected {
        return Err(anyhow!(
            "account discriminator mismatch: not a {account_name} account"
        ));
    }
    let mut body = &data[8..];
    T::deserialize(&mut body)
        .map_err(|e| anyhow!("failed to decode {account_name} account: {e}"))
}

#[cfg(test)]
pub(crate) fn encode_account<T: borsh::BorshSerialize>(account_name: &str, value: &T) -> Vec<u8> {
    let mut data = anchor_account(account_name).to_vec();
    borsh::to_writer(&mut data, value).unwrap();
    data
}
