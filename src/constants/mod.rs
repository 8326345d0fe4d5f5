//! Constants used by the crate.
//!
//! Organized into submodules:
//!
//! - `seeds`: seed values used for PDA derivation
//! - `accounts`: program account addresses
//! - `fees`: platform fee-split and compute-budget defaults

/// Constants used as seeds for deriving PDAs (Program Derived Addresses)
pub mod seeds {
    /// Seed for the pool authority PDA (shared by DBC and DAMM v2)
    pub const POOL_AUTHORITY_SEED: &[u8] = b"pool_authority";

    /// Seed for DBC virtual pool PDAs
    pub const POOL_SEED: &[u8] = b"pool";

    /// Seed for anchor event authority PDAs
    pub const EVENT_AUTHORITY_SEED: &[u8] = b"__event_authority";

    /// Seed for DAMM v2 position PDAs
    pub const POSITION_SEED: &[u8] = b"position";
}

/// Constants related to program accounts and authorities
pub mod accounts {
    use solana_sdk::{pubkey, pubkey::Pubkey};

    /// Public key for the Dynamic Bonding Curve program
    pub const DBC_PROGRAM: Pubkey = pubkey!("dbcij3LWUppWqq96dh6gJWwBifmcGfLSB5D4DuSMaqN");

    /// Public key for the DAMM v2 constant-product AMM program
    pub const DAMM_V2_PROGRAM: Pubkey = pubkey!("cpamdpZCGKUy5JxQXB4dcpGPiikHawvSWAd6mEn1sGG");

    /// System Program ID
    pub const SYSTEM_PROGRAM: Pubkey = pubkey!("11111111111111111111111111111111");

    /// Token Program ID
    pub const TOKEN_PROGRAM: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

    /// Token-2022 Program ID
    pub const TOKEN_2022_PROGRAM: Pubkey = pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");

    /// Associated Token Program ID
    pub const ASSOCIATED_TOKEN_PROGRAM: Pubkey = pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

    /// Wrapped SOL mint
    pub const WSOL_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");

    pub const JITO_TIP_ACCOUNTS: [&str; 8] = [
        "96gYZGLnJYVFmbjzopPSU6QiEV5fGqZNyN9nmNhvrZU5",
        "HFqU5x63VTqvQss8hp11i4wVV8bD44PvwucfZ2bU7gRe",
        "Cw8CFyM9FkoMi7K7Crf6HNQqf4uEMzpKw6QNghXLvLkY",
        "ADaUMid9yfUytqMBgopwjb2DTLSokTSzL1zt6iGPaS49",
        "DfXygSm4jCyNCybVYYK6DwvWqjKee8pbDmJGcLWNDXjh",
        "ADuUkR4vqLUMWXxW9gh6D6L8pMSawimctcNZ5pGwDcEt",
        "DttWaMuVvTiduZRnguLF7jNxTgiMBZ1hyAumKUiL2KRL",
        "3AVi9Tg9Uo68tJfuvoKvqKNWKkC5wPdSSdeBnizKZ6jT",
    ];
}

pub mod fees {
    /// Basis-point denominator for all fee arithmetic
    pub const BPS_DENOMINATOR: u64 = 10_000;

    /// Default platform share of claimed creator fees, in basis points
    pub const DEFAULT_PLATFORM_FEE_BPS: u64 = 500; // 5%

    pub const DEFAULT_COMPUTE_UNIT_LIMIT: u32 = 400_000;
    pub const DEFAULT_COMPUTE_UNIT_PRICE: u64 = 100_000;
}

pub mod endpoints {
    /// Public mainnet RPC, used when no env override is present
    pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

    /// Jito mainnet block engine bundle endpoint
    pub const DEFAULT_JITO_URL: &str = "https://mainnet.block-engine.jito.wtf/api/v1/bundles";
}
