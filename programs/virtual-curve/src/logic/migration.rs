//! Migration amounts: what a config must mint, what the external AMM
//! receives, how much LP that buys and who gets it.

use anchor_lang::prelude::*;
use ethnum::U256;
use integer_sqrt::IntegerSquareRoot;

use crate::constants::*;
use crate::error::PoolError;
use crate::logic::curve::{get_delta_amount_base_unsigned, LiquidityCurve};
use crate::state::{MigrationOption, PoolConfig};
use crate::utils::{
    mul_div_u256, mul_div_u64, shl_div_u256, u256_to_u128, u256_to_u64, Rounding, SafeCast,
    SafeMath,
};

/// Amounts derived once when a config is created
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MigrationAmounts {
    pub migration_sqrt_price: u128,
    pub swap_base_amount: u64,
    pub migration_base_amount: u64,
    pub minimum_base_supply: u64,
}

pub fn get_migration_amounts(
    curve: &LiquidityCurve,
    migration_quote_threshold: u64,
    migration_option: MigrationOption,
) -> Result<MigrationAmounts> {
    let step = match curve.swap_quote_to_base(curve.sqrt_start_price, 0, migration_quote_threshold)
    {
        Ok(step) => step,
        Err(_) => {
            msg!("Invalid config: curve cannot absorb the migration quote threshold");
            return err!(PoolError::InvalidConfig);
        }
    };

    // Trades may overshoot the threshold, so the curve keeps a buffer of base
    let buffered_base = mul_div_u64(
        step.output_amount,
        100 + u64::from(SWAP_BUFFER_PERCENTAGE),
        100,
        Rounding::Down,
    )?
    .min(curve.total_base_amount()?);
    let migration_base_amount = get_migration_base_amount(
        migration_option,
        migration_quote_threshold,
        step.next_sqrt_price,
    )?;

    Ok(MigrationAmounts {
        migration_sqrt_price: step.next_sqrt_price,
        swap_base_amount: step.output_amount,
        migration_base_amount,
        minimum_base_supply: buffered_base.safe_add(migration_base_amount)?,
    })
}

/// Full-range liquidity supplied by `quote_amount` at `sqrt_price`
fn get_full_range_liquidity(quote_amount: u64, sqrt_price: u128) -> Result<u128> {
    let range = sqrt_price.safe_sub(MIN_SQRT_PRICE)?;
    u256_to_u128(shl_div_u256(
        u128::from(quote_amount),
        range,
        RESOLUTION * 2,
        Rounding::Down,
    )?)
}

/// Base that pairs with `quote_amount` in the target AMM at `sqrt_price`
pub fn get_migration_base_amount(
    migration_option: MigrationOption,
    quote_amount: u64,
    sqrt_price: u128,
) -> Result<u64> {
    match migration_option {
        MigrationOption::LegacyAmm => {
            let price = U256::from(sqrt_price) * U256::from(sqrt_price);
            let base = mul_div_u256(
                U256::from(quote_amount),
                U256::ONE << (RESOLUTION * 2),
                price,
                Rounding::Up,
            )?;
            u256_to_u64(base)
        }
        MigrationOption::AmmV2 => {
            let liquidity = get_full_range_liquidity(quote_amount, sqrt_price)?;
            get_delta_amount_base_unsigned(sqrt_price, MAX_SQRT_PRICE, liquidity, Rounding::Up)
        }
    }
}

/// LP minted for the deposit
pub fn get_lp_amount(
    migration_option: MigrationOption,
    base_amount: u64,
    quote_amount: u64,
    sqrt_price: u128,
) -> Result<u64> {
    match migration_option {
        MigrationOption::LegacyAmm => (u128::from(base_amount) * u128::from(quote_amount))
            .integer_sqrt()
            .safe_cast(),
        MigrationOption::AmmV2 => {
            (get_full_range_liquidity(quote_amount, sqrt_price)? >> RESOLUTION).safe_cast()
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LpDistribution {
    pub partner_unlocked: u64,
    pub partner_locked: u64,
    pub creator_unlocked: u64,
    pub creator_locked: u64,
    /// Unassigned share and rounding dust, locked in escrow for good
    pub retained: u64,
}

impl LpDistribution {
    pub fn partner_total(&self) -> u64 {
        self.partner_unlocked + self.partner_locked
    }

    pub fn creator_total(&self) -> u64 {
        self.creator_unlocked + self.creator_locked
    }
}

pub fn get_lp_distribution(config: &PoolConfig, lp_amount: u64) -> Result<LpDistribution> {
    let share = |percentage: u8| {
        mul_div_u64(lp_amount, u64::from(percentage), 100, Rounding::Down)
    };
    let partner_unlocked = share(config.partner_lp_percentage)?;
    let partner_locked = share(config.partner_locked_lp_percentage)?;
    let creator_unlocked = share(config.creator_lp_percentage)?;
    let creator_locked = share(config.creator_locked_lp_percentage)?;
    let retained = lp_amount
        .safe_sub(partner_unlocked)?
        .safe_sub(partner_locked)?
        .safe_sub(creator_unlocked)?
        .safe_sub(creator_locked)?;
    Ok(LpDistribution {
        partner_unlocked,
        partner_locked,
        creator_unlocked,
        creator_locked,
        retained,
    })
}

/// Everything `migrate` moves, mints and records
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MigrationOutcome {
    pub deposit_base: u64,
    pub deposit_quote: u64,
    pub surplus: u64,
    pub leftover_base: u64,
    pub lp_amount: u64,
    pub lp: LpDistribution,
}

pub fn get_migration_outcome(
    config: &PoolConfig,
    base_reserve: u64,
    quote_reserve: u64,
    sqrt_price: u128,
) -> Result<MigrationOutcome> {
    let deposit_quote = config.migration_quote_threshold;
    let surplus = quote_reserve.safe_sub(deposit_quote)?;
    let deposit_base =
        get_migration_base_amount(config.migration_option, deposit_quote, sqrt_price)?;
    let leftover_base = base_reserve.safe_sub(deposit_base)?;
    let lp_amount = get_lp_amount(config.migration_option, deposit_base, deposit_quote, sqrt_price)?;
    require!(lp_amount > 0, PoolError::InvalidAmount);

    Ok(MigrationOutcome {
        deposit_base,
        deposit_quote,
        surplus,
        leftover_base,
        lp_amount,
        lp: get_lp_distribution(config, lp_amount)?,
    })
}

/// Returns `(partner, protocol)`; the protocol keeps the rounding remainder
pub fn split_surplus(surplus: u64) -> Result<(u64, u64)> {
    let partner = mul_div_u64(surplus, u64::from(PARTNER_SURPLUS_SHARE), 100, Rounding::Down)?;
    Ok((partner, surplus.safe_sub(partner)?))
}
