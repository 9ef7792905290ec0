//! LP vesting

use anchor_lang::prelude::*;

use crate::state::LockedVestingConfig;
use crate::utils::{mul_div_u128, Rounding, SafeCast, SafeMath};

/// Portion of `locked_amount` vested at `now` for a lock that started at
/// `start`. Nothing vests before the cliff; afterwards the cliff unlock and one
/// `amount_per_period` per elapsed `frequency` vest in proportion to the
/// schedule total.
pub fn get_vested_amount(
    locked_amount: u64,
    vesting: &LockedVestingConfig,
    start: u64,
    now: u64,
) -> Result<u64> {
    if locked_amount == 0 || vesting.is_permanent() {
        return Ok(0);
    }
    let cliff_point = start.safe_add(vesting.cliff_duration_from_migration_time)?;
    if now < cliff_point {
        return Ok(0);
    }

    let periods = if vesting.frequency == 0 {
        0
    } else {
        ((now - cliff_point) / vesting.frequency).min(vesting.number_of_period)
    };
    let vested_units = u128::from(vesting.cliff_unlock_amount)
        .safe_add(u128::from(periods).safe_mul(u128::from(vesting.amount_per_period))?)?;
    let vested: u64 = mul_div_u128(
        u128::from(locked_amount),
        vested_units,
        vesting.total_units(),
        Rounding::Down,
    )?
    .safe_cast()?;
    Ok(vested.min(locked_amount))
}
