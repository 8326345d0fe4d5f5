use anyhow::anyhow;
use base64::{engine::general_purpose, Engine as _};
use solana_sdk::{
    compute_budget::ComputeBudgetInstruction, instruction::Instruction, transaction::Transaction,
};

use crate::constants::fees::{DEFAULT_COMPUTE_UNIT_LIMIT, DEFAULT_COMPUTE_UNIT_PRICE};

pub mod fees;

pub type SolanaRpcClient = solana_client::nonblocking::rpc_client::RpcClient;

/// Priority fee configuration prepended to every built transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityFee {
    pub unit_limit: u32,
    pub unit_price: u64,
}

impl Default for PriorityFee {
    fn default() -> Self {
        Self {
            unit_limit: DEFAULT_COMPUTE_UNIT_LIMIT,
            unit_price: DEFAULT_COMPUTE_UNIT_PRICE,
        }
    }
}

#[inline]
pub fn create_priority_fee_instructions(priority_fee: PriorityFee) -> Vec<Instruction> {
    let mut instructions = Vec::with_capacity(2);
    instructions.push(ComputeBudgetInstruction::set_compute_unit_limit(
        priority_fee.unit_limit,
    ));
    instructions.push(ComputeBudgetInstruction::set_compute_unit_price(
        priority_fee.unit_price,
    ));

    instructions
}

/// Serializes a transaction to the base64 wire form returned to wallets
pub fn serialize_transaction_base64(transaction: &Transaction) -> Result<String, anyhow::Error> {
    let bytes = bincode::serialize(transaction)
        .map_err(|e| anyhow!("failed to serialize transaction: {e}"))?;
    Ok(general_purpose::STANDARD.encode(bytes))
}

/// Decodes a signed transaction submitted by a wallet in base64 wire form
pub fn deserialize_transaction_base64(encoded: &str) -> Result<Transaction, anyhow::Error> {
    let bytes = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| anyhow!("invalid base64 transaction: {e}"))?;
    let transaction = bincode::deserialize(&bytes)
        .map_err(|e| anyhow!("invalid transaction bytes: {e}"))?;
    Ok(transaction)
}

#[cfg(test)]
mod tests {
    use solana_sdk::{hash::Hash, signature::Keypair, signer::Signer, system_instruction};

    use super::*;

    #[test]
    fn transaction_base64_round_trip() {
        let payer = Keypair::new();
        let ix = system_instruction::transfer(&payer.pubkey(), &payer.pubkey(), 1);
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&payer.pubkey()),
            &[&payer],
            Hash::new_unique(),
        );

        let encoded = serialize_transaction_base64(&tx).unwrap();
        let decoded = deserialize_transaction_base64(&encoded).unwrap();
        assert_eq!(decoded.signatures, tx.signatures);
        assert_eq!(decoded.message, tx.message);
    }

    #[test]
    fn rejects_garbage_base64() {
        assert!(deserialize_transaction_base64("not base64!!!").is_err());
        assert!(deserialize_transaction_base64("AAAA").is_err());
    }
}
