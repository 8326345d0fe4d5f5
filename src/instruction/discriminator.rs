//! Instruction-selector resolution.
//!
//! On-chain programs route instructions by an 8-byte discriminator prefix.
//! For anchor programs this is the first 8 bytes of `sha256("global:" +
//! instruction_name)`, but deployed programs occasionally diverge from the
//! convention, so resolution is layered:
//!
//! 1. env override `DISC_<UPPER_SNAKE_NAME>` — 16 hex chars;
//! 2. anchor IDL JSON lookup when `DBC_IDL_PATH` is set;
//! 3. the anchor-convention hash for instructions this crate knows;
//! 4. an all-zero placeholder, logged loudly — the transaction will be
//!    rejected on-chain, but the builders stay total.

use std::env;
use std::fs;

use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::warn;

pub const PLACEHOLDER: [u8; 8] = [0u8; 8];

/// Instructions this crate builds; anything else falls through to the
/// placeholder unless an override or IDL entry supplies it.
const KNOWN_INSTRUCTIONS: &[&str] = &[
    "initialize_virtual_pool",
    "claim_creator_trading_fee",
    "withdraw_leftover",
    "claim_position_fee",
    "remove_liquidity",
];

/// Resolves the discriminator for an instruction name.
pub fn resolve_instruction(name: &str) -> [u8; 8] {
    if let Some(disc) = override_from(env::var(override_var(name)).ok(), name) {
        return disc;
    }

    if let Ok(path) = env::var("DBC_IDL_PATH") {
        match load_idl(&path) {
            Ok(idl) => {
                if let Some(disc) = lookup_in_idl(&idl, name) {
                    return disc;
                }
            }
            Err(e) => warn!("ignoring unreadable IDL at {path}: {e}"),
        }
    }

    if KNOWN_INSTRUCTIONS.contains(&name) {
        return anchor_instruction(name);
    }

    warn!("no discriminator source for instruction {name:?}, using placeholder");
    PLACEHOLDER
}

/// Anchor-convention instruction discriminator: `sha256("global:" + name)[..8]`
pub fn anchor_instruction(name: &str) -> [u8; 8] {
    hash_prefix("global", name)
}

/// Anchor-convention account discriminator: `sha256("account:" + name)[..8]`
pub fn anchor_account(name: &str) -> [u8; 8] {
    hash_prefix("account", name)
}

fn hash_prefix(namespace: &str, name: &str) -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(b":");
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();
    let mut disc = [0u8; 8];
    disc.copy_from_slice(&digest[..8]);
    disc
}

fn override_var(name: &str) -> String {
    format!("DISC_{}", name.to_ascii_uppercase())
}

fn override_from(raw: Option<String>, name: &str) -> Option<[u8; 8]> {
    let raw = raw?;
    match hex::decode(raw.trim()) {
        Ok(bytes) if bytes.len() == 8 => {
            let mut disc = [0u8; 8];
            disc.copy_from_slice(&bytes);
            Some(disc)
        }
        Ok(bytes) => {
            warn!(
                "ignoring {}: expected 8 bytes of hex, got {}",
                override_var(name),
                bytes.len()
            );
            None
        }
        Err(e) => {
            warn!("ignoring {}: {e}", override_var(name));
            None
        }
    }
}

fn load_idl(path: &str) -> Result<Value, anyhow::Error> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn lookup_in_idl(idl: &Value, name: &str) -> Option<[u8; 8]> {
    let instructions = idl.get("instructions")?.as_array()?;
    let entry = instructions
        .iter()
        .find(|ix| ix.get("name").and_then(Value::as_str) == Some(name))?;
    let raw = entry.get("discriminator")?.as_array()?;
    if raw.len() != 8 {
        warn!("IDL discriminator for {name:?} has {} bytes", raw.len());
        return None;
    }
    let mut disc = [0u8; 8];
    for (slot, value) in disc.iter_mut().zip(raw) {
        *slot = value.as_u64().filter(|v| *v <= u8::MAX as u64)? as u8;
    }
    Some(disc)
}
