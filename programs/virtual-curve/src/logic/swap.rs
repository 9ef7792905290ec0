//! Swap quote: fee numerator, curve walk and fee placement for one trade

use anchor_lang::prelude::*;

use crate::error::PoolError;
use crate::logic::fee::{
    get_fee_on_amount, get_total_fee_numerator, get_variable_fee_numerator, split_fee,
    FeeBreakdown,
};
use crate::state::{CollectFeeMode, PoolConfig, TradeDirection, VirtualPool, VolatilityTracker};
use crate::utils::SafeMath;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapParams {
    pub amount_in: u64,
    pub direction: TradeDirection,
    pub has_referral: bool,
    /// Slot or timestamp, per the config's activation type
    pub current_point: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapResult {
    pub direction: TradeDirection,
    /// Paid by the trader
    pub amount_in: u64,
    /// Added to the input reserve
    pub reserve_amount_in: u64,
    /// Removed from the output reserve
    pub curve_output_amount: u64,
    /// Delivered to the trader
    pub output_amount: u64,
    pub next_sqrt_price: u128,
    pub next_segment_index: u8,
    pub fee_numerator: u64,
    pub fee: FeeBreakdown,
    /// Whether the fee is denominated in the quote token
    pub fee_in_quote: bool,
}

/// Quote a trade against the pool without mutating it. `tracker` must already
/// have its references refreshed for the current time.
pub fn get_swap_result(
    pool: &VirtualPool,
    config: &PoolConfig,
    tracker: &VolatilityTracker,
    params: &SwapParams,
) -> Result<SwapResult> {
    require!(params.amount_in > 0, PoolError::InvalidAmount);

    let base_fee_numerator = config.base_fee.get_fee_numerator(
        params.current_point,
        pool.activation_point,
        params.direction,
        params.amount_in,
    )?;
    let variable_fee_numerator = match &config.dynamic_fee {
        Some(dynamic_fee) => get_variable_fee_numerator(dynamic_fee, tracker)?,
        None => 0,
    };
    let fee_numerator = get_total_fee_numerator(base_fee_numerator, variable_fee_numerator);

    let fee_on_input = config.collect_fee_mode == CollectFeeMode::QuoteToken
        && params.direction == TradeDirection::QuoteToBase;
    let fee_in_quote = match config.collect_fee_mode {
        CollectFeeMode::QuoteToken => true,
        CollectFeeMode::OutputToken => params.direction == TradeDirection::BaseToQuote,
    };

    let (reserve_amount_in, input_fee) = if fee_on_input {
        get_fee_on_amount(params.amount_in, fee_numerator)?
    } else {
        (params.amount_in, 0)
    };
    require!(reserve_amount_in > 0, PoolError::InvalidAmount);

    let curve = config.curve();
    let step = match params.direction {
        TradeDirection::QuoteToBase => {
            let step = curve.swap_quote_to_base_until(
                pool.sqrt_price,
                pool.curve_segment_index,
                reserve_amount_in,
                config.migration_sqrt_price,
            )?;
            // Quote past the migration price stays in the reserve, up to a cap
            require!(
                step.amount_left <= config.max_swallow_quote_amount()?,
                PoolError::SwapAmountIsOverThreshold
            );
            // Base set aside for the migration deposit is never sold
            let sellable = pool.base_reserve.safe_sub(config.migration_base_threshold)?;
            require!(step.output_amount <= sellable, PoolError::ExceedsCurve);
            step
        }
        TradeDirection::BaseToQuote => {
            let step = curve.swap_base_to_quote(
                pool.sqrt_price,
                pool.curve_segment_index,
                reserve_amount_in,
            )?;
            require!(step.output_amount <= pool.quote_reserve, PoolError::ExceedsCurve);
            step
        }
    };

    let (output_amount, total_fee) = if fee_on_input {
        (step.output_amount, input_fee)
    } else {
        get_fee_on_amount(step.output_amount, fee_numerator)?
    };
    let fee = split_fee(
        total_fee,
        config.creator_trading_fee_percentage,
        params.has_referral,
    )?;

    Ok(SwapResult {
        direction: params.direction,
        amount_in: params.amount_in,
        reserve_amount_in,
        curve_output_amount: step.output_amount,
        output_amount,
        next_sqrt_price: step.next_sqrt_price,
        next_segment_index: step.next_segment_index,
        fee_numerator,
        fee,
        fee_in_quote,
    })
}
