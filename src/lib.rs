//! Token-launch gateway: protocol-client glue for launching tokens on
//! Dynamic Bonding Curve pools and exiting fees/liquidity from DBC and
//! DAMM v2 pools.
//!
//! The library builds unsigned Solana transactions from discovered on-chain
//! account state — fetch account, decode known byte layout, construct
//! instruction, bundle into a transaction — and hands them to a wallet for
//! signing. Signed transactions come back through the bundle relay client.
//! The binary in `main.rs` exposes the whole thing as an HTTP API.

pub mod accounts;
pub mod common;
pub mod config;
pub mod constants;
pub mod damm;
pub mod dbc;
pub mod error;
pub mod instruction;
pub mod ipfs;
pub mod jito;
pub mod server;

pub use common::{PriorityFee, SolanaRpcClient};
pub use jito::JitoClient;
