//! Per-pool ledger
//!
//! Reserves are virtual: they track what the curve owns, while the vaults
//! also hold accrued fees, the migration surplus and leftover base until they
//! are claimed.

use anchor_lang::prelude::*;

use crate::error::PoolError;
use crate::logic::migration::{get_migration_outcome, split_surplus, MigrationOutcome};
use crate::logic::swap::{get_swap_result, SwapParams, SwapResult};
use crate::state::{PoolConfig, PoolPhase, PoolStatus, TradeDirection, VolatilityTracker};
use crate::utils::SafeMath;

#[account]
#[derive(InitSpace, Debug, Default)]
pub struct VirtualPool {
    pub config: Pubkey,
    pub creator: Pubkey,
    pub base_mint: Pubkey,
    pub base_vault: Pubkey,
    pub quote_vault: Pubkey,
    /// Set by migration preparation
    pub lp_mint: Pubkey,

    pub base_reserve: u64,
    pub quote_reserve: u64,

    pub protocol_base_fee: u64,
    pub protocol_quote_fee: u64,
    pub partner_base_fee: u64,
    pub partner_quote_fee: u64,
    pub creator_base_fee: u64,
    pub creator_quote_fee: u64,

    /// Current sqrt price (Q64.64)
    pub sqrt_price: u128,
    /// Curve segment holding `sqrt_price`
    pub curve_segment_index: u8,
    /// Slot or timestamp the fee schedule counts from
    pub activation_point: u64,
    pub status: PoolStatus,

    pub curve_completed_at: u64,
    pub migrated_at: u64,
    /// Quote left after the migration deposit
    pub migration_surplus: u64,
    /// Base left after the migration deposit
    pub leftover_base: u64,
    pub partner_surplus_claimed: bool,
    pub protocol_surplus_claimed: bool,
    pub leftover_withdrawn: bool,

    pub volatility_tracker: VolatilityTracker,

    pub total_swaps: u64,
}

impl VirtualPool {
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        &mut self,
        config_key: Pubkey,
        config: &PoolConfig,
        creator: Pubkey,
        base_mint: Pubkey,
        base_vault: Pubkey,
        quote_vault: Pubkey,
        activation_point: u64,
    ) {
        *self = VirtualPool {
            config: config_key,
            creator,
            base_mint,
            base_vault,
            quote_vault,
            base_reserve: config.initial_base_supply,
            sqrt_price: config.sqrt_start_price,
            activation_point,
            ..Default::default()
        };
    }

    pub fn phase(&self, config: &PoolConfig) -> PoolPhase {
        match self.status {
            PoolStatus::Migrated => {
                if self.partner_surplus_claimed
                    && self.protocol_surplus_claimed
                    && self.leftover_withdrawn
                {
                    PoolPhase::Settled
                } else {
                    PoolPhase::Migrated
                }
            }
            PoolStatus::Active => {
                if self.quote_reserve >= config.migration_quote_threshold {
                    PoolPhase::ThresholdReached
                } else {
                    PoolPhase::Active
                }
            }
        }
    }

    pub fn is_migration_prepared(&self) -> bool {
        self.lp_mint != Pubkey::default()
    }

    /// Execute a trade. State, including the volatility tracker, is only
    /// written once every check has passed.
    pub fn swap(
        &mut self,
        config: &PoolConfig,
        params: &SwapParams,
        minimum_amount_out: u64,
        current_timestamp: u64,
    ) -> Result<SwapResult> {
        require!(
            self.phase(config).allows_trading(),
            PoolError::PoolMigrated
        );

        let mut tracker = self.volatility_tracker;
        if let Some(dynamic_fee) = &config.dynamic_fee {
            tracker.update_references(dynamic_fee, self.sqrt_price, current_timestamp)?;
        }

        let result = get_swap_result(self, config, &tracker, params)?;
        require!(
            result.output_amount >= minimum_amount_out,
            PoolError::SlippageExceeded
        );

        if let Some(dynamic_fee) = &config.dynamic_fee {
            tracker.update_volatility_accumulator(dynamic_fee, result.next_sqrt_price)?;
            tracker.last_update_timestamp = current_timestamp;
        }

        self.apply_swap(&result)?;
        self.volatility_tracker = tracker;
        self.total_swaps = self.total_swaps.safe_add(1)?;

        if self.phase(config) == PoolPhase::ThresholdReached {
            self.curve_completed_at = current_timestamp;
        }
        Ok(result)
    }

    fn apply_swap(&mut self, result: &SwapResult) -> Result<()> {
        match result.direction {
            TradeDirection::QuoteToBase => {
                self.quote_reserve = self.quote_reserve.safe_add(result.reserve_amount_in)?;
                self.base_reserve = self.base_reserve.safe_sub(result.curve_output_amount)?;
            }
            TradeDirection::BaseToQuote => {
                self.base_reserve = self.base_reserve.safe_add(result.reserve_amount_in)?;
                self.quote_reserve = self.quote_reserve.safe_sub(result.curve_output_amount)?;
            }
        }
        self.sqrt_price = result.next_sqrt_price;
        self.curve_segment_index = result.next_segment_index;

        // Referral share leaves the vault with the swap
        let fee = &result.fee;
        if result.fee_in_quote {
            self.protocol_quote_fee = self.protocol_quote_fee.safe_add(fee.protocol)?;
            self.partner_quote_fee = self.partner_quote_fee.safe_add(fee.partner)?;
            self.creator_quote_fee = self.creator_quote_fee.safe_add(fee.creator)?;
        } else {
            self.protocol_base_fee = self.protocol_base_fee.safe_add(fee.protocol)?;
            self.partner_base_fee = self.partner_base_fee.safe_add(fee.partner)?;
            self.creator_base_fee = self.creator_base_fee.safe_add(fee.creator)?;
        }
        Ok(())
    }

    /// Move the curve's liquidity out. Must be the only path to `Migrated`.
    pub fn migrate(&mut self, config: &PoolConfig, current_timestamp: u64) -> Result<MigrationOutcome> {
        match self.phase(config) {
            PoolPhase::Active => return err!(PoolError::ThresholdNotMet),
            PoolPhase::Migrated | PoolPhase::Settled => return err!(PoolError::AlreadyMigrated),
            PoolPhase::ThresholdReached => {}
        }
        require!(self.is_migration_prepared(), PoolError::MigrationNotPrepared);

        let outcome =
            get_migration_outcome(config, self.base_reserve, self.quote_reserve, self.sqrt_price)?;

        self.status = PoolStatus::Migrated;
        self.migrated_at = current_timestamp;
        self.migration_surplus = outcome.surplus;
        self.leftover_base = outcome.leftover_base;
        self.base_reserve = 0;
        self.quote_reserve = 0;
        Ok(outcome)
    }

    // ------------------------------------------------------------------------
    // Trading fee claims: repeatable, drain the accumulator
    // ------------------------------------------------------------------------

    /// Returns `(base, quote)` owed to the partner and zeroes it
    pub fn claim_partner_trading_fee(&mut self) -> (u64, u64) {
        let claimed = (self.partner_base_fee, self.partner_quote_fee);
        self.partner_base_fee = 0;
        self.partner_quote_fee = 0;
        claimed
    }

    pub fn claim_creator_trading_fee(&mut self) -> (u64, u64) {
        let claimed = (self.creator_base_fee, self.creator_quote_fee);
        self.creator_base_fee = 0;
        self.creator_quote_fee = 0;
        claimed
    }

    pub fn claim_protocol_fee(&mut self) -> (u64, u64) {
        let claimed = (self.protocol_base_fee, self.protocol_quote_fee);
        self.protocol_base_fee = 0;
        self.protocol_quote_fee = 0;
        claimed
    }

    // ------------------------------------------------------------------------
    // One-shot withdrawals after migration
    // ------------------------------------------------------------------------

    fn require_migrated(&self) -> Result<()> {
        require!(self.status == PoolStatus::Migrated, PoolError::NotMigrated);
        Ok(())
    }

    pub fn withdraw_partner_surplus(&mut self) -> Result<u64> {
        self.require_migrated()?;
        require!(!self.partner_surplus_claimed, PoolError::AlreadyClaimed);
        let (partner, _) = split_surplus(self.migration_surplus)?;
        self.partner_surplus_claimed = true;
        Ok(partner)
    }

    pub fn withdraw_protocol_surplus(&mut self) -> Result<u64> {
        self.require_migrated()?;
        require!(!self.protocol_surplus_claimed, PoolError::AlreadyClaimed);
        let (_, protocol) = split_surplus(self.migration_surplus)?;
        self.protocol_surplus_claimed = true;
        Ok(protocol)
    }

    pub fn withdraw_leftover(&mut self) -> Result<u64> {
        self.require_migrated()?;
        require!(!self.leftover_withdrawn, PoolError::AlreadyClaimed);
        self.leftover_withdrawn = true;
        Ok(self.leftover_base)
    }
}
