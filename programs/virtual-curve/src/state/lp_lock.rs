//! Escrowed LP owed to the partner or creator after migration

use anchor_lang::prelude::*;

use crate::constants::{CREATOR_LOCK_SEED, PARTNER_LOCK_SEED};
use crate::error::PoolError;
use crate::logic::vesting::get_vested_amount;
use crate::state::LockedVestingConfig;
use crate::utils::SafeMath;

#[derive(
    Default, Clone, Copy, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace,
)]
#[repr(u8)]
pub enum LockRole {
    #[default]
    Partner = 0,
    Creator = 1,
}

impl LockRole {
    pub fn seed(&self) -> &'static [u8] {
        match self {
            LockRole::Partner => PARTNER_LOCK_SEED,
            LockRole::Creator => CREATOR_LOCK_SEED,
        }
    }
}

/// One record per (pool, role), created before migration and funded by it.
/// Unlocked LP is claimable immediately; locked LP follows `vesting`.
#[account]
#[derive(InitSpace, Debug, Default)]
pub struct LpLock {
    pub pool: Pubkey,
    pub role: LockRole,
    pub beneficiary: Pubkey,
    pub unlocked_amount: u64,
    pub locked_amount: u64,
    /// Total LP already paid out, unlocked and vested
    pub released_amount: u64,
    pub vesting: LockedVestingConfig,
    /// Unix timestamp of migration; vesting counts from here
    pub start_timestamp: u64,
    pub is_funded: bool,
}

impl LpLock {
    pub fn initialize(&mut self, pool: Pubkey, role: LockRole, beneficiary: Pubkey) {
        *self = LpLock {
            pool,
            role,
            beneficiary,
            ..Default::default()
        };
    }

    pub fn fund(
        &mut self,
        unlocked_amount: u64,
        locked_amount: u64,
        vesting: LockedVestingConfig,
        start_timestamp: u64,
    ) -> Result<()> {
        require!(!self.is_funded, PoolError::AlreadyMigrated);
        self.unlocked_amount = unlocked_amount;
        self.locked_amount = locked_amount;
        self.vesting = vesting;
        self.start_timestamp = start_timestamp;
        self.is_funded = true;
        Ok(())
    }

    pub fn total_amount(&self) -> u64 {
        self.unlocked_amount.saturating_add(self.locked_amount)
    }

    pub fn claimable_amount(&self, now: u64) -> Result<u64> {
        require!(self.is_funded, PoolError::NotMigrated);
        let vested =
            get_vested_amount(self.locked_amount, &self.vesting, self.start_timestamp, now)?;
        self.unlocked_amount
            .safe_add(vested)?
            .safe_sub(self.released_amount)
    }

    /// Mark everything claimable at `now` as released and return it. A second
    /// call at the same time returns zero.
    pub fn release(&mut self, now: u64) -> Result<u64> {
        let amount = self.claimable_amount(now)?;
        self.released_amount = self.released_amount.safe_add(amount)?;
        Ok(amount)
    }
}
