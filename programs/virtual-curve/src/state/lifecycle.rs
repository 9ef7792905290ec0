//! Pool lifecycle phases
//!
//! The stored status only distinguishes curve trading from migrated. The
//! phase adds the two derived states: a pool whose quote reserve reached the
//! threshold is waiting for migration, and a migrated pool whose one-shot
//! withdrawals are all done is settled.

use anchor_lang::prelude::*;

/// Persisted pool status. One-way: `Active` to `Migrated`.
#[derive(
    Default, Clone, Copy, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace,
)]
#[repr(u8)]
pub enum PoolStatus {
    #[default]
    Active = 0,
    Migrated = 1,
}

/// Lifecycle phase derived from status, reserves and settlement flags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolPhase {
    /// Trading on the curve
    Active,
    /// Quote reserve reached the migration threshold; trading is closed
    ThresholdReached,
    /// Liquidity moved to the external AMM, withdrawals outstanding
    Migrated,
    /// Every one-shot withdrawal has been made
    Settled,
}

impl PoolPhase {
    pub fn allows_trading(&self) -> bool {
        matches!(self, PoolPhase::Active)
    }
}
