/// Overflow-safe arithmetic for every amount and price calculation. Checked
/// operations return `PoolError` instead of wrapping, and log the operands so a
/// failed transaction shows which step overflowed.
use anchor_lang::prelude::*;

use crate::error::PoolError;

// ============================================================================
// Type Definitions
// ============================================================================

pub trait SafeMath<T> {
    fn safe_add(self, v: T) -> Result<T>;
    fn safe_sub(self, v: T) -> Result<T>;
    fn safe_mul(self, v: T) -> Result<T>;
    fn safe_div(self, v: T) -> Result<T>;
}

/// Narrowing conversion that fails instead of truncating
pub trait SafeCast<T> {
    fn safe_cast(self) -> Result<T>;
}

// ============================================================================
// Core Implementation
// ============================================================================

macro_rules! impl_safe_math {
    ($type:ty) => {
        impl SafeMath<$type> for $type {
            fn safe_add(self, v: $type) -> Result<$type> {
                self.checked_add(v).ok_or_else(|| {
                    msg!("Math overflow in safe_add: {} + {}", self, v);
                    PoolError::MathOverflow.into()
                })
            }

            fn safe_sub(self, v: $type) -> Result<$type> {
                self.checked_sub(v).ok_or_else(|| {
                    msg!("Math underflow in safe_sub: {} - {}", self, v);
                    PoolError::MathOverflow.into()
                })
            }

            fn safe_mul(self, v: $type) -> Result<$type> {
                self.checked_mul(v).ok_or_else(|| {
                    msg!("Math overflow in safe_mul: {} * {}", self, v);
                    PoolError::MathOverflow.into()
                })
            }

            fn safe_div(self, v: $type) -> Result<$type> {
                if v == 0 {
                    msg!("Division by zero in safe_div: {} / {}", self, v);
                    return Err(PoolError::DivisionByZero.into());
                }
                self.checked_div(v).ok_or_else(|| {
                    msg!("Math error in safe_div: {} / {}", self, v);
                    PoolError::MathOverflow.into()
                })
            }
        }
    };
}

impl_safe_math!(u8);
impl_safe_math!(u16);
impl_safe_math!(u32);
impl_safe_math!(u64);
impl_safe_math!(u128);

macro_rules! impl_safe_cast {
    ($from:ty => $($to:ty),+) => {
        $(
            impl SafeCast<$to> for $from {
                fn safe_cast(self) -> Result<$to> {
                    <$to>::try_from(self).map_err(|_| {
                        msg!("Cast overflow: {} does not fit", self);
                        PoolError::MathOverflow.into()
                    })
                }
            }
        )+
    };
}

impl_safe_cast!(u128 => u64, u32, u16, u8);
impl_safe_cast!(u64 => u32, u16, u8);
impl_safe_cast!(i64 => u64);

// ============================================================================
// Tests
// ============================================================================
