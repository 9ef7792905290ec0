/// 256-bit intermediate arithmetic for Q64.64 price and liquidity products.
/// Every helper takes an explicit rounding direction so callers decide which
/// side of a trade absorbs the remainder.
use anchor_lang::prelude::*;
use ethnum::U256;

use crate::error::PoolError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    Up,
    Down,
}

/// `x * y / denominator` with the product held in 256 bits
pub fn mul_div_u256(x: U256, y: U256, denominator: U256, rounding: Rounding) -> Result<U256> {
    require!(denominator != U256::ZERO, PoolError::DivisionByZero);
    let product = x.checked_mul(y).ok_or(PoolError::MathOverflow)?;
    let quotient = product / denominator;
    match rounding {
        Rounding::Up if product % denominator != U256::ZERO => Ok(quotient + U256::ONE),
        _ => Ok(quotient),
    }
}

pub fn mul_div_u128(x: u128, y: u128, denominator: u128, rounding: Rounding) -> Result<u128> {
    let result = mul_div_u256(
        U256::from(x),
        U256::from(y),
        U256::from(denominator),
        rounding,
    )?;
    u256_to_u128(result)
}

pub fn mul_div_u64(x: u64, y: u64, denominator: u64, rounding: Rounding) -> Result<u64> {
    let result = mul_div_u256(
        U256::from(x),
        U256::from(y),
        U256::from(denominator),
        rounding,
    )?;
    u256_to_u64(result)
}

/// `(x << offset) / y`
pub fn shl_div_u256(x: u128, y: u128, offset: u32, rounding: Rounding) -> Result<U256> {
    require!(y != 0, PoolError::DivisionByZero);
    let shifted = U256::from(x) << offset;
    let denominator = U256::from(y);
    let quotient = shifted / denominator;
    match rounding {
        Rounding::Up if shifted % denominator != U256::ZERO => Ok(quotient + U256::ONE),
        _ => Ok(quotient),
    }
}

pub fn u256_to_u128(value: U256) -> Result<u128> {
    require!(value <= U256::from(u128::MAX), PoolError::MathOverflow);
    Ok(value.as_u128())
}

pub fn u256_to_u64(value: U256) -> Result<u64> {
    require!(value <= U256::from(u64::MAX), PoolError::MathOverflow);
    Ok(value.as_u64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_rounding() {
        assert_eq!(mul_div_u64(10, 10, 3, Rounding::Down).unwrap(), 33);
        assert_eq!(mul_div_u64(10, 10, 3, Rounding::Up).unwrap(), 34);
        assert_eq!(mul_div_u64(9, 10, 3, Rounding::Up).unwrap(), 30);
    }

    #[test]
    fn test_mul_div_wide_product() {
        // u128::MAX * u128::MAX only fits in the 256-bit intermediate
        let result = mul_div_u128(u128::MAX, u128::MAX, u128::MAX, Rounding::Down).unwrap();
        assert_eq!(result, u128::MAX);
    }

    #[test]
    fn test_mul_div_rejects_zero_denominator_and_overflow() {
        assert!(mul_div_u128(1, 1, 0, Rounding::Down).is_err());
        assert!(mul_div_u64(u64::MAX, 2, 1, Rounding::Down).is_err());
    }

    #[test]
    fn test_shl_div() {
        let one_q64 = shl_div_u256(3, 3, 64, Rounding::Down).unwrap();
        assert_eq!(u256_to_u128(one_q64).unwrap(), 1u128 << 64);
        let third = shl_div_u256(1, 3, 64, Rounding::Up).unwrap();
        let third_down = shl_div_u256(1, 3, 64, Rounding::Down).unwrap();
        assert_eq!(third, third_down + U256::ONE);
    }
}
