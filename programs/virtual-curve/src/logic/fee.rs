//! Trading fee engine
//!
//! The fee numerator for a trade is the base fee (scheduler or rate limiter)
//! plus the optional volatility fee, capped at `MAX_FEE_NUMERATOR`. Fees are
//! charged as `amount * numerator / FEE_DENOMINATOR` rounded up, then split
//! between protocol, referral, partner and creator. The protocol share takes
//! every rounding remainder.

use anchor_lang::prelude::*;
use ethnum::U256;

use crate::constants::*;
use crate::state::config::check;
use crate::state::{
    BaseFeeConfig, BaseFeeMode, CollectFeeMode, DynamicFeeConfig, TradeDirection,
    VolatilityTracker,
};
use crate::utils::{mul_div_u128, mul_div_u64, u256_to_u64, Rounding, SafeCast, SafeMath};

// ============================================================================
// Base fee
// ============================================================================

pub trait BaseFeeHandler {
    fn validate(&self, collect_fee_mode: CollectFeeMode) -> Result<()>;

    fn get_base_fee_numerator(
        &self,
        current_point: u64,
        activation_point: u64,
        direction: TradeDirection,
        input_amount: u64,
    ) -> Result<u64>;
}

/// Time-decaying fee: linear or exponential reduction per elapsed period
#[derive(Clone, Copy, Debug)]
pub struct FeeScheduler {
    pub cliff_fee_numerator: u64,
    pub number_of_period: u16,
    pub period_frequency: u64,
    pub reduction_factor: u64,
    pub mode: BaseFeeMode,
}

impl From<&BaseFeeConfig> for FeeScheduler {
    fn from(config: &BaseFeeConfig) -> Self {
        Self {
            cliff_fee_numerator: config.cliff_fee_numerator,
            number_of_period: config.first_factor,
            period_frequency: config.second_factor,
            reduction_factor: config.third_factor,
            mode: config.base_fee_mode,
        }
    }
}

impl FeeScheduler {
    fn passed_periods(&self, current_point: u64, activation_point: u64) -> u64 {
        if self.period_frequency == 0 {
            return 0;
        }
        let elapsed = current_point.saturating_sub(activation_point);
        (elapsed / self.period_frequency).min(u64::from(self.number_of_period))
    }
}

impl BaseFeeHandler for FeeScheduler {
    fn validate(&self, _collect_fee_mode: CollectFeeMode) -> Result<()> {
        validate_cliff(self.cliff_fee_numerator)?;
        check(
            self.number_of_period == 0 || self.period_frequency > 0,
            "fee schedule periods need a frequency",
        )?;
        if self.mode == BaseFeeMode::Exponential {
            check(
                self.reduction_factor < BASIS_POINT_MAX,
                "exponential reduction factor must be below 100%",
            )?;
        }
        Ok(())
    }

    fn get_base_fee_numerator(
        &self,
        current_point: u64,
        activation_point: u64,
        _direction: TradeDirection,
        _input_amount: u64,
    ) -> Result<u64> {
        let periods = self.passed_periods(current_point, activation_point);
        let fee_numerator = match self.mode {
            BaseFeeMode::Exponential => {
                exponential_decay(self.cliff_fee_numerator, self.reduction_factor, periods)?
            }
            _ => self
                .cliff_fee_numerator
                .saturating_sub(periods.saturating_mul(self.reduction_factor)),
        };
        Ok(fee_numerator.max(MIN_FEE_NUMERATOR))
    }
}

/// `cliff * (1 - reduction / 10_000) ^ periods` in Q64.64
fn exponential_decay(cliff_fee_numerator: u64, reduction_bps: u64, periods: u64) -> Result<u64> {
    if reduction_bps == 0 || periods == 0 {
        return Ok(cliff_fee_numerator);
    }
    let base = (u128::from(BASIS_POINT_MAX.safe_sub(reduction_bps)?) << RESOLUTION)
        / u128::from(BASIS_POINT_MAX);
    let factor = pow_q64(base, periods);
    mul_div_u128(
        u128::from(cliff_fee_numerator),
        factor,
        ONE_Q64,
        Rounding::Down,
    )?
    .safe_cast()
}

/// `base ^ exp` for a Q64.64 `base` below one
fn pow_q64(base: u128, mut exp: u64) -> u128 {
    let mut result = ONE_Q64;
    let mut square = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result = (result * square) >> RESOLUTION;
        }
        square = (square * square) >> RESOLUTION;
        exp >>= 1;
    }
    result
}

/// Size-based fee on buys during the launch window. Each `reference_amount`
/// tranche above the first pays `fee_increment_bps` more than the previous one.
#[derive(Clone, Copy, Debug)]
pub struct FeeRateLimiter {
    pub cliff_fee_numerator: u64,
    pub fee_increment_bps: u16,
    pub max_limiter_duration: u64,
    pub reference_amount: u64,
}

impl From<&BaseFeeConfig> for FeeRateLimiter {
    fn from(config: &BaseFeeConfig) -> Self {
        Self {
            cliff_fee_numerator: config.cliff_fee_numerator,
            fee_increment_bps: config.first_factor,
            max_limiter_duration: config.second_factor,
            reference_amount: config.third_factor,
        }
    }
}

impl FeeRateLimiter {
    fn is_active(&self, current_point: u64, activation_point: u64, direction: TradeDirection) -> bool {
        direction == TradeDirection::QuoteToBase
            && current_point < activation_point.saturating_add(self.max_limiter_duration)
    }

    /// Blended numerator over every tranche of `input_amount`
    pub fn fee_numerator_for_amount(&self, input_amount: u64) -> Result<u64> {
        if input_amount <= self.reference_amount {
            return Ok(self.cliff_fee_numerator);
        }
        let increment = u64::from(self.fee_increment_bps)
            .safe_mul(FEE_DENOMINATOR)?
            .safe_div(BASIS_POINT_MAX)?;
        let excess = input_amount.safe_sub(self.reference_amount)?;
        let full_tranches = excess.safe_div(self.reference_amount)?;
        let partial = excess % self.reference_amount;
        let uncapped = if increment == 0 {
            full_tranches
        } else {
            full_tranches.min(MAX_FEE_NUMERATOR.saturating_sub(self.cliff_fee_numerator) / increment)
        };

        let cliff = U256::from(self.cliff_fee_numerator);
        let max_fee = U256::from(MAX_FEE_NUMERATOR);
        let reference = U256::from(self.reference_amount);
        let step = U256::from(increment);
        let c = U256::from(uncapped);

        // Tranche i (1-based) pays cliff + i * increment until the cap
        let uncapped_rates = c * cliff + step * c * (c + U256::ONE) / U256::from(2u8);
        let capped_rates = U256::from(full_tranches - uncapped) * max_fee;
        let partial_rate = (cliff + step * U256::from(full_tranches + 1)).min(max_fee);

        let total = cliff * reference
            + (uncapped_rates + capped_rates) * reference
            + partial_rate * U256::from(partial);
        let numerator = total / U256::from(input_amount);
        u256_to_u64(numerator.min(max_fee))
    }
}

impl BaseFeeHandler for FeeRateLimiter {
    fn validate(&self, collect_fee_mode: CollectFeeMode) -> Result<()> {
        validate_cliff(self.cliff_fee_numerator)?;
        check(
            collect_fee_mode == CollectFeeMode::QuoteToken,
            "rate limiter needs fees collected in quote",
        )?;
        check(
            self.reference_amount > 0 && self.max_limiter_duration > 0,
            "rate limiter needs a reference amount and a window",
        )?;
        check(
            self.fee_increment_bps > 0 && u64::from(self.fee_increment_bps) <= BASIS_POINT_MAX,
            "rate limiter increment out of range",
        )
    }

    fn get_base_fee_numerator(
        &self,
        current_point: u64,
        activation_point: u64,
        direction: TradeDirection,
        input_amount: u64,
    ) -> Result<u64> {
        if !self.is_active(current_point, activation_point, direction) {
            return Ok(self.cliff_fee_numerator);
        }
        self.fee_numerator_for_amount(input_amount)
    }
}

fn validate_cliff(cliff_fee_numerator: u64) -> Result<()> {
    check(
        (MIN_FEE_NUMERATOR..=MAX_FEE_NUMERATOR).contains(&cliff_fee_numerator),
        "cliff fee numerator out of range",
    )
}

impl BaseFeeConfig {
    pub fn validate(&self, collect_fee_mode: CollectFeeMode) -> Result<()> {
        match self.base_fee_mode {
            BaseFeeMode::Linear | BaseFeeMode::Exponential => {
                FeeScheduler::from(self).validate(collect_fee_mode)
            }
            BaseFeeMode::RateLimiter => FeeRateLimiter::from(self).validate(collect_fee_mode),
        }
    }

    pub fn get_fee_numerator(
        &self,
        current_point: u64,
        activation_point: u64,
        direction: TradeDirection,
        input_amount: u64,
    ) -> Result<u64> {
        match self.base_fee_mode {
            BaseFeeMode::Linear | BaseFeeMode::Exponential => FeeScheduler::from(self)
                .get_base_fee_numerator(current_point, activation_point, direction, input_amount),
            BaseFeeMode::RateLimiter => FeeRateLimiter::from(self).get_base_fee_numerator(
                current_point,
                activation_point,
                direction,
                input_amount,
            ),
        }
    }
}

// ============================================================================
// Dynamic fee
// ============================================================================

/// `ceil((accumulator * bin_step)^2 * variable_fee_control / 1e11)`
pub fn get_variable_fee_numerator(
    config: &DynamicFeeConfig,
    tracker: &VolatilityTracker,
) -> Result<u64> {
    let volatility_bins = U256::from(tracker.volatility_accumulator) * U256::from(config.bin_step);
    let variable_fee = volatility_bins * volatility_bins * U256::from(config.variable_fee_control);
    let scale = U256::from(DYNAMIC_FEE_SCALE);
    let numerator = (variable_fee + scale - U256::ONE) / scale;
    u256_to_u64(numerator.min(U256::from(MAX_FEE_NUMERATOR)))
}

pub fn get_total_fee_numerator(base_fee_numerator: u64, variable_fee_numerator: u64) -> u64 {
    base_fee_numerator
        .saturating_add(variable_fee_numerator)
        .min(MAX_FEE_NUMERATOR)
}

// ============================================================================
// Application and split
// ============================================================================

/// Returns `(amount_after_fee, fee)`
pub fn get_fee_on_amount(amount: u64, fee_numerator: u64) -> Result<(u64, u64)> {
    let fee = mul_div_u64(amount, fee_numerator, FEE_DENOMINATOR, Rounding::Up)?;
    Ok((amount.safe_sub(fee)?, fee))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeBreakdown {
    pub total: u64,
    pub protocol: u64,
    pub referral: u64,
    pub partner: u64,
    pub creator: u64,
}

/// Split `fee` between the parties. Partner, creator and referral shares
/// round down; the protocol keeps the remainder so the parts always sum to
/// `fee`.
pub fn split_fee(
    fee: u64,
    creator_trading_fee_percentage: u8,
    has_referral: bool,
) -> Result<FeeBreakdown> {
    let trading_percent = u64::from(100 - PROTOCOL_FEE_PERCENT);
    let creator_percent = u64::from(creator_trading_fee_percentage);

    let partner = mul_div_u64(
        fee,
        trading_percent * (100 - creator_percent),
        10_000,
        Rounding::Down,
    )?;
    let creator = mul_div_u64(fee, trading_percent * creator_percent, 10_000, Rounding::Down)?;
    let referral = if has_referral {
        mul_div_u64(
            fee,
            u64::from(PROTOCOL_FEE_PERCENT) * u64::from(HOST_FEE_PERCENT),
            10_000,
            Rounding::Down,
        )?
    } else {
        0
    };
    let protocol = fee.safe_sub(partner)?.safe_sub(creator)?.safe_sub(referral)?;

    Ok(FeeBreakdown {
        total: fee,
        protocol,
        referral,
        partner,
        creator,
    })
}

// ============================================================================
// Tests
// ============================================================================
