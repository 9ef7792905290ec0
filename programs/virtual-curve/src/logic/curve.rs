//! Piecewise liquidity curve over Q64.64 sqrt prices
//!
//! Each curve point closes a segment: segment `i` spans from the previous
//! point's sqrt price (or the start price) up to `points[i].sqrt_price` with
//! constant liquidity `points[i].liquidity`. Inside a segment the usual
//! concentrated liquidity relations hold:
//!
//!   Δbase  = L · (1/√Pa − 1/√Pb)
//!   Δquote = L · (√Pb − √Pa)
//!
//! The pool persists the index of the segment holding its current price, and
//! trades walk forward (buys) or backward (sells) from there.

use anchor_lang::prelude::*;
use ethnum::U256;

use crate::constants::RESOLUTION;
use crate::error::PoolError;
use crate::state::CurvePoint;
use crate::utils::{mul_div_u256, shl_div_u256, u256_to_u128, u256_to_u64, Rounding, SafeMath};

// ============================================================================
// Segment math
// ============================================================================

/// `L * (upper - lower) / (lower * upper)`
pub fn get_delta_amount_base_unsigned_256(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    rounding: Rounding,
) -> Result<U256> {
    let delta = upper_sqrt_price.safe_sub(lower_sqrt_price)?;
    let denominator = U256::from(lower_sqrt_price) * U256::from(upper_sqrt_price);
    mul_div_u256(U256::from(liquidity), U256::from(delta), denominator, rounding)
}

pub fn get_delta_amount_base_unsigned(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    rounding: Rounding,
) -> Result<u64> {
    u256_to_u64(get_delta_amount_base_unsigned_256(
        lower_sqrt_price,
        upper_sqrt_price,
        liquidity,
        rounding,
    )?)
}

/// `L * (upper - lower) >> 128`
pub fn get_delta_amount_quote_unsigned_256(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    rounding: Rounding,
) -> Result<U256> {
    let delta = upper_sqrt_price.safe_sub(lower_sqrt_price)?;
    let product = U256::from(liquidity) * U256::from(delta);
    let shift = RESOLUTION * 2;
    let quotient = product >> shift;
    let remainder_mask = (U256::ONE << shift) - U256::ONE;
    match rounding {
        Rounding::Up if product & remainder_mask != U256::ZERO => Ok(quotient + U256::ONE),
        _ => Ok(quotient),
    }
}

pub fn get_delta_amount_quote_unsigned(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    rounding: Rounding,
) -> Result<u64> {
    u256_to_u64(get_delta_amount_quote_unsigned_256(
        lower_sqrt_price,
        upper_sqrt_price,
        liquidity,
        rounding,
    )?)
}

/// Price after adding `amount` quote: `√P + (amount << 128) / L`, rounded down
pub fn get_next_sqrt_price_from_quote_in(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
) -> Result<u128> {
    let quotient = shl_div_u256(u128::from(amount), liquidity, RESOLUTION * 2, Rounding::Down)?;
    let next = U256::from(sqrt_price)
        .checked_add(quotient)
        .ok_or(PoolError::MathOverflow)?;
    u256_to_u128(next)
}

/// Price after adding `amount` base: `L·√P / (L + amount·√P)`, rounded up
pub fn get_next_sqrt_price_from_base_in(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
) -> Result<u128> {
    if amount == 0 {
        return Ok(sqrt_price);
    }
    let product = U256::from(amount) * U256::from(sqrt_price);
    let denominator = U256::from(liquidity) + product;
    let next = mul_div_u256(
        U256::from(liquidity),
        U256::from(sqrt_price),
        denominator,
        Rounding::Up,
    )?;
    u256_to_u128(next)
}

// ============================================================================
// Curve walking
// ============================================================================

/// Result of walking the curve with a net input amount
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CurveStep {
    pub output_amount: u64,
    pub next_sqrt_price: u128,
    pub next_segment_index: u8,
    /// Input left over when the walk stopped at a price limit
    pub amount_left: u64,
}

#[derive(Clone, Copy, Debug)]
pub struct LiquidityCurve<'a> {
    pub sqrt_start_price: u128,
    pub points: &'a [CurvePoint],
}

impl<'a> LiquidityCurve<'a> {
    pub fn new(sqrt_start_price: u128, points: &'a [CurvePoint]) -> Self {
        Self {
            sqrt_start_price,
            points,
        }
    }

    /// `(lower, upper, liquidity)` of segment `index`
    fn segment(&self, index: usize) -> Result<(u128, u128, u128)> {
        let point = self.points.get(index).ok_or(PoolError::ExceedsCurve)?;
        let lower = match index {
            0 => self.sqrt_start_price,
            _ => self.points[index - 1].sqrt_price,
        };
        Ok((lower, point.sqrt_price, point.liquidity))
    }

    fn last_index(&self) -> Result<usize> {
        self.points
            .len()
            .checked_sub(1)
            .ok_or_else(|| error!(PoolError::ExceedsCurve))
    }

    /// Buy base with `amount_in` quote, moving the price up
    pub fn swap_quote_to_base(
        &self,
        sqrt_price: u128,
        segment_index: u8,
        amount_in: u64,
    ) -> Result<CurveStep> {
        self.swap_quote_to_base_until(sqrt_price, segment_index, amount_in, u128::MAX)
    }

    /// Buy base, stopping once the price reaches `sqrt_price_limit`. Quote not
    /// absorbed before the limit is returned in `amount_left`.
    pub fn swap_quote_to_base_until(
        &self,
        sqrt_price: u128,
        segment_index: u8,
        amount_in: u64,
        sqrt_price_limit: u128,
    ) -> Result<CurveStep> {
        require!(amount_in > 0, PoolError::InvalidAmount);
        let last = self.last_index()?;
        let mut index = usize::from(segment_index).min(last);
        let mut current = sqrt_price;
        let mut amount_left = amount_in;
        let mut output = U256::ZERO;

        while amount_left > 0 && current < sqrt_price_limit {
            let (_, upper, liquidity) = self.segment(index)?;
            if current >= upper {
                require!(index < last, PoolError::ExceedsCurve);
                index += 1;
                continue;
            }

            let target = upper.min(sqrt_price_limit);
            let max_amount_in =
                get_delta_amount_quote_unsigned_256(current, target, liquidity, Rounding::Up)?;
            if U256::from(amount_left) >= max_amount_in {
                let delta_base =
                    get_delta_amount_base_unsigned_256(current, target, liquidity, Rounding::Down)?;
                output = output.checked_add(delta_base).ok_or(PoolError::MathOverflow)?;
                amount_left = amount_left.safe_sub(max_amount_in.as_u64())?;
                current = target;
                if target == upper {
                    if index == last {
                        require!(
                            amount_left == 0 || current >= sqrt_price_limit,
                            PoolError::ExceedsCurve
                        );
                    } else {
                        index += 1;
                    }
                }
            } else {
                let next = get_next_sqrt_price_from_quote_in(current, liquidity, amount_left)?;
                let delta_base =
                    get_delta_amount_base_unsigned_256(current, next, liquidity, Rounding::Down)?;
                output = output.checked_add(delta_base).ok_or(PoolError::MathOverflow)?;
                amount_left = 0;
                current = next;
            }
        }

        Ok(CurveStep {
            output_amount: u256_to_u64(output)?,
            next_sqrt_price: current,
            next_segment_index: index as u8,
            amount_left,
        })
    }

    /// Sell `amount_in` base for quote, moving the price down
    pub fn swap_base_to_quote(
        &self,
        sqrt_price: u128,
        segment_index: u8,
        amount_in: u64,
    ) -> Result<CurveStep> {
        require!(amount_in > 0, PoolError::InvalidAmount);
        let last = self.last_index()?;
        let mut index = usize::from(segment_index).min(last);
        let mut current = sqrt_price;
        let mut amount_left = amount_in;
        let mut output = U256::ZERO;

        while amount_left > 0 {
            let (lower, _, liquidity) = self.segment(index)?;
            if current <= lower {
                require!(index > 0, PoolError::ExceedsCurve);
                index -= 1;
                continue;
            }

            let max_amount_in =
                get_delta_amount_base_unsigned_256(lower, current, liquidity, Rounding::Up)?;
            if U256::from(amount_left) >= max_amount_in {
                let delta_quote =
                    get_delta_amount_quote_unsigned_256(lower, current, liquidity, Rounding::Down)?;
                output = output.checked_add(delta_quote).ok_or(PoolError::MathOverflow)?;
                amount_left = amount_left.safe_sub(max_amount_in.as_u64())?;
                current = lower;
                if index == 0 {
                    require!(amount_left == 0, PoolError::ExceedsCurve);
                }
            } else {
                let next = get_next_sqrt_price_from_base_in(current, liquidity, amount_left)?;
                let delta_quote =
                    get_delta_amount_quote_unsigned_256(next, current, liquidity, Rounding::Down)?;
                output = output.checked_add(delta_quote).ok_or(PoolError::MathOverflow)?;
                amount_left = 0;
                current = next;
            }
        }

        Ok(CurveStep {
            output_amount: u256_to_u64(output)?,
            next_sqrt_price: current,
            next_segment_index: index as u8,
            amount_left: 0,
        })
    }

    /// Base released by walking the whole curve, saturating at `u64::MAX`
    pub fn total_base_amount(&self) -> Result<u64> {
        let mut total = U256::ZERO;
        for index in 0..self.points.len() {
            let (lower, upper, liquidity) = self.segment(index)?;
            let delta = get_delta_amount_base_unsigned_256(lower, upper, liquidity, Rounding::Down)?;
            total = total.checked_add(delta).unwrap_or(U256::MAX);
        }
        if total > U256::from(u64::MAX) {
            return Ok(u64::MAX);
        }
        Ok(total.as_u64())
    }
}

// ============================================================================
// Tests
// ============================================================================
