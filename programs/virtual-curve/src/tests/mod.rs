//! Pool lifecycle tests driving the on-chain state types directly

pub mod full_flow;
pub mod settlement;

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::PoolError;
use crate::logic::SwapParams;
use crate::state::*;

pub const U64_MAX: u128 = u64::MAX as u128;
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// 16 points in 5% steps of the max sqrt price, the last one at the max,
/// 0.25% flat fee and a 5 SOL threshold. Locked LP goes 95/5 to partner and
/// creator.
pub fn scenario_params() -> ConfigParameters {
    let curve = (1..=16u32)
        .map(|i| CurvePoint {
            sqrt_price: if i == 16 {
                MAX_SQRT_PRICE
            } else {
                MAX_SQRT_PRICE * u128::from(i * 5) / 100
            },
            liquidity: U64_MAX << (30 + i),
        })
        .collect();

    ConfigParameters {
        base_fee: BaseFeeConfig {
            cliff_fee_numerator: 2_500_000,
            ..Default::default()
        },
        token_decimal: 6,
        partner_locked_lp_percentage: 95,
        creator_locked_lp_percentage: 5,
        migration_quote_threshold: 5 * LAMPORTS_PER_SOL,
        sqrt_start_price: MIN_SQRT_PRICE << 32,
        curve,
        ..Default::default()
    }
}

pub fn build_config(params: &ConfigParameters) -> PoolConfig {
    params
        .build(Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique())
        .unwrap()
}

pub fn new_pool(config: &PoolConfig, activation_point: u64) -> VirtualPool {
    let mut pool = VirtualPool::default();
    pool.initialize(
        Pubkey::new_unique(),
        config,
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        activation_point,
    );
    pool
}

/// Stand-in for `create_migration_metadata`
pub fn prepare_migration(pool: &mut VirtualPool) {
    pool.lp_mint = Pubkey::new_unique();
}

pub fn buy(amount_in: u64, current_point: u64) -> SwapParams {
    SwapParams {
        amount_in,
        direction: TradeDirection::QuoteToBase,
        has_referral: false,
        current_point,
    }
}

pub fn sell(amount_in: u64, current_point: u64) -> SwapParams {
    SwapParams {
        amount_in,
        direction: TradeDirection::BaseToQuote,
        has_referral: false,
        current_point,
    }
}

pub fn assert_pool_error<T: std::fmt::Debug>(result: Result<T>, expected: PoolError) {
    assert_eq!(result.unwrap_err(), anchor_lang::error::Error::from(expected));
}

/// Pool that crossed the threshold with a single 5.5 SOL buy and is migrated
pub fn migrated_pool(config: &PoolConfig) -> VirtualPool {
    let mut pool = new_pool(config, 0);
    pool.swap(config, &buy(5_500_000_000, 1), 0, 1).unwrap();
    prepare_migration(&mut pool);
    pool.migrate(config, 100).unwrap();
    pool
}
