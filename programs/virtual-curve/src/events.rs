use anchor_lang::prelude::*;

use crate::state::{ConfigParameters, LockRole, TradeDirection};

#[event]
pub struct ConfigCreated {
    pub config: Pubkey,
    pub quote_mint: Pubkey,
    pub fee_claimer: Pubkey,
    pub leftover_receiver: Pubkey,
    pub migration_sqrt_price: u128,
    pub initial_base_supply: u64,
    pub params: ConfigParameters,
}

#[event]
pub struct ClaimFeeOperatorCreated {
    pub operator: Pubkey,
    pub created_at: i64,
}

#[event]
pub struct ClaimFeeOperatorClosed {
    pub operator: Pubkey,
    pub closed_at: i64,
}

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub config: Pubkey,
    pub creator: Pubkey,
    pub base_mint: Pubkey,
    pub base_supply: u64,
    pub sqrt_price: u128,
    pub activation_point: u64,
}

#[event]
pub struct SwapExecuted {
    pub pool: Pubkey,
    pub trader: Pubkey,
    pub direction: TradeDirection,
    pub amount_in: u64,
    pub output_amount: u64,
    pub fee_numerator: u64,
    pub total_fee: u64,
    pub protocol_fee: u64,
    pub partner_fee: u64,
    pub creator_fee: u64,
    pub referral_fee: u64,
    pub fee_in_quote: bool,
    pub next_sqrt_price: u128,
    pub quote_reserve: u64,
    pub has_referral: bool,
}

#[event]
pub struct CurveCompleted {
    pub pool: Pubkey,
    pub config: Pubkey,
    pub base_reserve: u64,
    pub quote_reserve: u64,
    pub sqrt_price: u128,
    pub timestamp: u64,
}

#[event]
pub struct MigrationPrepared {
    pub pool: Pubkey,
    pub lp_mint: Pubkey,
    pub partner_lp_lock: Pubkey,
    pub creator_lp_lock: Pubkey,
}

#[event]
pub struct MigrationCompleted {
    pub pool: Pubkey,
    pub amm_pool: Pubkey,
    pub deposit_base: u64,
    pub deposit_quote: u64,
    pub lp_amount: u64,
    pub partner_lp: u64,
    pub creator_lp: u64,
    pub retained_lp: u64,
    pub surplus: u64,
    pub leftover_base: u64,
    pub migrated_at: u64,
}

#[event]
pub struct TradingFeeClaimed {
    pub pool: Pubkey,
    pub fee_claimer: Pubkey,
    pub base_amount: u64,
    pub quote_amount: u64,
}

#[event]
pub struct CreatorTradingFeeClaimed {
    pub pool: Pubkey,
    pub creator: Pubkey,
    pub base_amount: u64,
    pub quote_amount: u64,
}

#[event]
pub struct ProtocolFeeClaimed {
    pub pool: Pubkey,
    pub operator: Pubkey,
    pub base_amount: u64,
    pub quote_amount: u64,
}

#[event]
pub struct SurplusWithdrawn {
    pub pool: Pubkey,
    pub receiver: Pubkey,
    pub is_partner: bool,
    pub amount: u64,
}

#[event]
pub struct LeftoverWithdrawn {
    pub pool: Pubkey,
    pub leftover_receiver: Pubkey,
    pub amount: u64,
}

#[event]
pub struct LpLockReleased {
    pub pool: Pubkey,
    pub lp_lock: Pubkey,
    pub role: LockRole,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub released_amount: u64,
}
