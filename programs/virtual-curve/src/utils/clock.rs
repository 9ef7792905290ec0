//! Clock helpers for fee schedules and vesting

use anchor_lang::prelude::*;

use crate::state::ActivationType;
use crate::utils::SafeCast;

/// Current point on the config's activation axis (slot or unix timestamp)
pub fn current_point(activation_type: ActivationType) -> Result<u64> {
    let clock = Clock::get()?;
    match activation_type {
        ActivationType::Slot => Ok(clock.slot),
        ActivationType::Timestamp => clock.unix_timestamp.safe_cast(),
    }
}

/// Current unix timestamp as an unsigned value
pub fn current_timestamp() -> Result<u64> {
    Clock::get()?.unix_timestamp.safe_cast()
}
