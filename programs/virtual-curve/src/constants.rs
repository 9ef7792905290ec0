//! Program constants

use anchor_lang::prelude::*;

// PDA seeds
pub const POOL_SEED: &[u8] = b"pool";
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";
pub const TOKEN_VAULT_SEED: &[u8] = b"token_vault";
pub const BASE_MINT_SEED: &[u8] = b"base_mint";
pub const CLAIM_FEE_OPERATOR_SEED: &[u8] = b"cf_operator";
pub const LP_MINT_SEED: &[u8] = b"lp_mint";
pub const LP_VAULT_SEED: &[u8] = b"lp_vault";
pub const LP_LOCK_SEED: &[u8] = b"lp_lock";
pub const PARTNER_LOCK_SEED: &[u8] = b"partner";
pub const CREATOR_LOCK_SEED: &[u8] = b"creator";

// Fee math
pub const FEE_DENOMINATOR: u64 = 1_000_000_000;
pub const MIN_FEE_NUMERATOR: u64 = 100_000; // 0.01%
pub const MAX_FEE_NUMERATOR: u64 = 990_000_000; // 99%
pub const BASIS_POINT_MAX: u64 = 10_000;
pub const DYNAMIC_FEE_SCALE: u128 = 100_000_000_000; // 1e11

// Fee and surplus shares, in percent
pub const PROTOCOL_FEE_PERCENT: u8 = 20;
pub const HOST_FEE_PERCENT: u8 = 20;
pub const PARTNER_SURPLUS_SHARE: u8 = 80;
pub const SWAP_BUFFER_PERCENTAGE: u8 = 25;
/// Quote a buy may push past the migration price, in percent of the threshold
pub const MAX_SWALLOW_PERCENTAGE: u8 = 20;

// Curve bounds (Q64.64 sqrt price)
pub const MAX_CURVE_POINT: usize = 20;
pub const MIN_SQRT_PRICE: u128 = 4_295_048_016;
pub const MAX_SQRT_PRICE: u128 = 79_226_673_521_066_979_257_578_248_091;
pub const RESOLUTION: u32 = 64;
pub const ONE_Q64: u128 = 1u128 << RESOLUTION;

// Token parameters
pub const MIN_TOKEN_DECIMALS: u8 = 6;
pub const MAX_TOKEN_DECIMALS: u8 = 9;
pub const LP_MINT_DECIMALS: u8 = 9;
pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;

/// Keys allowed to register and close claim fee operators
pub mod admin {
    use super::*;

    pub const ADMINS: [Pubkey; 2] = [
        anchor_lang::solana_program::pubkey!("3mBtj5ngPK8VpBu1hn1DWYvrz5Y7Fz4BHCEXTcXdoNEn"),
        anchor_lang::solana_program::pubkey!("Hmgoqho3b6XjR9YSSka3bYWGYNE9SWM4EXrPCBZqUxXK"),
    ];

    pub fn is_admin(key: &Pubkey) -> bool {
        if cfg!(feature = "local") {
            return true;
        }
        ADMINS.contains(key)
    }
}

/// External AMM programs accepted as migration targets
pub mod amm {
    use super::*;

    pub const LEGACY_AMM_PROGRAM_ID: Pubkey =
        anchor_lang::solana_program::pubkey!("Eo7WjKq67rjJQSZxS6z3YkapzY3eMj6Xy8X5EQVn5UaB");
    pub const AMM_V2_PROGRAM_ID: Pubkey =
        anchor_lang::solana_program::pubkey!("cpamdpZCGKUy5JxQXB4dcpGPiikHawvSWAd6mEn1sGG");
}
