//! Partner-authored pool configuration
//!
//! A `PoolConfig` is written once by `create_config` and never mutated. Every
//! pool created from it reads its curve, fee schedule, LP split and vesting
//! terms from here.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::PoolError;
use crate::logic::curve::LiquidityCurve;
use crate::logic::migration::get_migration_amounts;
use crate::utils::{mul_div_u64, Rounding};

// ============================================================================
// Enums
// ============================================================================

/// Clock used for fee schedule periods
#[derive(
    Default, Clone, Copy, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace,
)]
#[repr(u8)]
pub enum ActivationType {
    #[default]
    Slot = 0,
    Timestamp = 1,
}

#[derive(
    Default, Clone, Copy, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace,
)]
#[repr(u8)]
pub enum BaseFeeMode {
    #[default]
    Linear = 0,
    Exponential = 1,
    RateLimiter = 2,
}

/// Token the trading fee is charged in
#[derive(
    Default, Clone, Copy, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace,
)]
#[repr(u8)]
pub enum CollectFeeMode {
    /// Always quote: buys pay on input, sells pay on output
    #[default]
    QuoteToken = 0,
    /// Always the output token
    OutputToken = 1,
}

#[derive(
    Default, Clone, Copy, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace,
)]
#[repr(u8)]
pub enum MigrationOption {
    /// Constant-product AMM
    #[default]
    LegacyAmm = 0,
    /// Full-range concentrated liquidity AMM
    AmmV2 = 1,
}

impl MigrationOption {
    pub fn program_id(&self) -> Pubkey {
        match self {
            MigrationOption::LegacyAmm => amm::LEGACY_AMM_PROGRAM_ID,
            MigrationOption::AmmV2 => amm::AMM_V2_PROGRAM_ID,
        }
    }
}

#[derive(
    Default, Clone, Copy, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace,
)]
#[repr(u8)]
pub enum TokenType {
    #[default]
    SplToken = 0,
    Token2022 = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
#[repr(u8)]
pub enum TradeDirection {
    BaseToQuote = 0,
    QuoteToBase = 1,
}

// ============================================================================
// Config components
// ============================================================================

/// Base fee schedule.
///
/// Linear/Exponential: `first_factor` = number of periods, `second_factor` =
/// period length, `third_factor` = reduction per period.
/// RateLimiter: `first_factor` = fee increment in bps, `second_factor` =
/// limiter window, `third_factor` = reference amount.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace,
)]
pub struct BaseFeeConfig {
    pub cliff_fee_numerator: u64,
    pub base_fee_mode: BaseFeeMode,
    pub first_factor: u16,
    pub second_factor: u64,
    pub third_factor: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct DynamicFeeParameters {
    pub bin_step: u16,
    pub filter_period: u16,
    pub decay_period: u16,
    pub reduction_factor: u16,
    pub max_volatility_accumulator: u32,
    pub variable_fee_control: u32,
}

/// Volatility-driven fee added on top of the base fee
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace,
)]
pub struct DynamicFeeConfig {
    pub bin_step: u16,
    /// `bin_step` as a Q64.64 fraction of one
    pub bin_step_u128: u128,
    pub filter_period: u16,
    pub decay_period: u16,
    pub reduction_factor: u16,
    pub max_volatility_accumulator: u32,
    pub variable_fee_control: u32,
}

impl DynamicFeeParameters {
    pub fn validate(&self) -> Result<()> {
        check(self.bin_step > 0, "dynamic fee bin step is zero")?;
        check(
            self.filter_period < self.decay_period,
            "dynamic fee filter period must be below decay period",
        )?;
        check(
            u64::from(self.reduction_factor) <= BASIS_POINT_MAX,
            "dynamic fee reduction factor above 100%",
        )?;
        check(
            self.max_volatility_accumulator > 0 && self.variable_fee_control > 0,
            "dynamic fee accumulator cap and control must be non-zero",
        )
    }

    pub fn to_config(&self) -> DynamicFeeConfig {
        DynamicFeeConfig {
            bin_step: self.bin_step,
            bin_step_u128: (u128::from(self.bin_step) << RESOLUTION) / u128::from(BASIS_POINT_MAX),
            filter_period: self.filter_period,
            decay_period: self.decay_period,
            reduction_factor: self.reduction_factor,
            max_volatility_accumulator: self.max_volatility_accumulator,
            variable_fee_control: self.variable_fee_control,
        }
    }
}

/// Release schedule for locked LP. Amounts are relative units: a beneficiary's
/// locked LP vests in proportion to `cliff_unlock_amount + periods * amount_per_period`
/// over the schedule total. An all-zero schedule locks LP permanently.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace,
)]
pub struct LockedVestingConfig {
    pub amount_per_period: u64,
    pub cliff_duration_from_migration_time: u64,
    pub frequency: u64,
    pub number_of_period: u64,
    pub cliff_unlock_amount: u64,
}

impl LockedVestingConfig {
    pub fn is_permanent(&self) -> bool {
        self.total_units() == 0
    }

    pub fn total_units(&self) -> u128 {
        u128::from(self.cliff_unlock_amount)
            + u128::from(self.amount_per_period) * u128::from(self.number_of_period)
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_permanent() {
            return Ok(());
        }
        check(
            self.number_of_period == 0 || (self.frequency > 0 && self.amount_per_period > 0),
            "vesting periods need a frequency and a per-period amount",
        )
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace,
)]
pub struct CurvePoint {
    /// Upper sqrt price bound of the segment (Q64.64)
    pub sqrt_price: u128,
    /// Liquidity active below `sqrt_price`
    pub liquidity: u128,
}

// ============================================================================
// Account
// ============================================================================

#[account]
#[derive(InitSpace, Debug, Default)]
pub struct PoolConfig {
    pub quote_mint: Pubkey,
    /// Partner identity entitled to partner trading fees and surplus
    pub fee_claimer: Pubkey,
    /// Receives base tokens not deposited at migration
    pub leftover_receiver: Pubkey,

    pub base_fee: BaseFeeConfig,
    pub dynamic_fee: Option<DynamicFeeConfig>,
    pub collect_fee_mode: CollectFeeMode,
    pub activation_type: ActivationType,
    pub migration_option: MigrationOption,
    pub token_type: TokenType,
    pub token_decimal: u8,
    /// Share of the non-protocol trading fee paid to the creator, in percent
    pub creator_trading_fee_percentage: u8,

    // LP split at migration, in percent of minted LP
    pub partner_lp_percentage: u8,
    pub partner_locked_lp_percentage: u8,
    pub creator_lp_percentage: u8,
    pub creator_locked_lp_percentage: u8,
    pub locked_vesting: LockedVestingConfig,

    /// Quote reserve at which the curve completes
    pub migration_quote_threshold: u64,
    /// Base reserved for the AMM deposit at the migration price
    pub migration_base_threshold: u64,
    /// Sqrt price reached when exactly the threshold has been bought
    pub migration_sqrt_price: u128,
    /// Base sold on the curve up to the migration price
    pub swap_base_amount: u64,
    /// Base minted into the vault at pool creation
    pub initial_base_supply: u64,
    pub fixed_token_supply: bool,

    pub sqrt_start_price: u128,
    pub curve_point_count: u8,
    pub curve: [CurvePoint; MAX_CURVE_POINT],
}

impl PoolConfig {
    pub fn curve(&self) -> LiquidityCurve<'_> {
        let count = usize::from(self.curve_point_count).min(MAX_CURVE_POINT);
        LiquidityCurve::new(self.sqrt_start_price, &self.curve[..count])
    }

    pub fn total_lp_percentage(&self) -> u16 {
        u16::from(self.partner_lp_percentage)
            + u16::from(self.partner_locked_lp_percentage)
            + u16::from(self.creator_lp_percentage)
            + u16::from(self.creator_locked_lp_percentage)
    }

    /// Quote a single buy may leave in the reserve once the migration price is reached
    pub fn max_swallow_quote_amount(&self) -> Result<u64> {
        mul_div_u64(
            self.migration_quote_threshold,
            u64::from(MAX_SWALLOW_PERCENTAGE),
            100,
            Rounding::Down,
        )
    }
}

// ============================================================================
// Creation parameters
// ============================================================================

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct ConfigParameters {
    pub base_fee: BaseFeeConfig,
    pub dynamic_fee: Option<DynamicFeeParameters>,
    pub collect_fee_mode: CollectFeeMode,
    pub activation_type: ActivationType,
    pub migration_option: MigrationOption,
    pub token_type: TokenType,
    pub token_decimal: u8,
    pub creator_trading_fee_percentage: u8,
    pub partner_lp_percentage: u8,
    pub partner_locked_lp_percentage: u8,
    pub creator_lp_percentage: u8,
    pub creator_locked_lp_percentage: u8,
    pub locked_vesting: LockedVestingConfig,
    pub migration_quote_threshold: u64,
    pub sqrt_start_price: u128,
    /// Fixed base supply; `None` mints exactly what the curve and migration need
    pub token_supply: Option<u64>,
    pub curve: Vec<CurvePoint>,
}

impl ConfigParameters {
    pub fn validate(&self) -> Result<()> {
        self.validate_curve()?;

        let lp_total = u16::from(self.partner_lp_percentage)
            + u16::from(self.partner_locked_lp_percentage)
            + u16::from(self.creator_lp_percentage)
            + u16::from(self.creator_locked_lp_percentage);
        check(lp_total <= 100, "LP percentages sum above 100")?;
        check(self.migration_quote_threshold > 0, "migration quote threshold is zero")?;
        check(
            self.creator_trading_fee_percentage <= 100,
            "creator trading fee percentage above 100",
        )?;
        check(
            (MIN_TOKEN_DECIMALS..=MAX_TOKEN_DECIMALS).contains(&self.token_decimal),
            "token decimals out of range",
        )?;
        check(
            self.token_type == TokenType::SplToken,
            "only SPL token base mints are supported",
        )?;

        self.base_fee.validate(self.collect_fee_mode)?;
        if let Some(dynamic_fee) = &self.dynamic_fee {
            dynamic_fee.validate()?;
        }
        self.locked_vesting.validate()
    }

    fn validate_curve(&self) -> Result<()> {
        check(
            !self.curve.is_empty() && self.curve.len() <= MAX_CURVE_POINT,
            "curve point count out of range",
        )?;
        check(
            self.sqrt_start_price >= MIN_SQRT_PRICE,
            "start price below minimum",
        )?;
        let mut previous = self.sqrt_start_price;
        for (i, point) in self.curve.iter().enumerate() {
            if point.sqrt_price <= previous {
                msg!("Invalid config: curve point {} not above previous price", i);
                return err!(PoolError::InvalidConfig);
            }
            if point.liquidity == 0 {
                msg!("Invalid config: curve point {} has no liquidity", i);
                return err!(PoolError::InvalidConfig);
            }
            previous = point.sqrt_price;
        }
        check(previous <= MAX_SQRT_PRICE, "curve ends above maximum price")
    }

    /// Validate and derive the immutable config account
    pub fn build(
        &self,
        quote_mint: Pubkey,
        fee_claimer: Pubkey,
        leftover_receiver: Pubkey,
    ) -> Result<PoolConfig> {
        self.validate()?;

        let mut curve = [CurvePoint::default(); MAX_CURVE_POINT];
        curve[..self.curve.len()].copy_from_slice(&self.curve);
        let liquidity_curve = LiquidityCurve::new(self.sqrt_start_price, &self.curve);
        let amounts = get_migration_amounts(
            &liquidity_curve,
            self.migration_quote_threshold,
            self.migration_option,
        )?;

        let initial_base_supply = match self.token_supply {
            Some(supply) => {
                if supply < amounts.minimum_base_supply {
                    msg!(
                        "Invalid config: token supply {} below required {}",
                        supply,
                        amounts.minimum_base_supply
                    );
                    return err!(PoolError::InvalidConfig);
                }
                supply
            }
            None => amounts.minimum_base_supply,
        };

        Ok(PoolConfig {
            quote_mint,
            fee_claimer,
            leftover_receiver,
            base_fee: self.base_fee,
            dynamic_fee: self.dynamic_fee.map(|params| params.to_config()),
            collect_fee_mode: self.collect_fee_mode,
            activation_type: self.activation_type,
            migration_option: self.migration_option,
            token_type: self.token_type,
            token_decimal: self.token_decimal,
            creator_trading_fee_percentage: self.creator_trading_fee_percentage,
            partner_lp_percentage: self.partner_lp_percentage,
            partner_locked_lp_percentage: self.partner_locked_lp_percentage,
            creator_lp_percentage: self.creator_lp_percentage,
            creator_locked_lp_percentage: self.creator_locked_lp_percentage,
            locked_vesting: self.locked_vesting,
            migration_quote_threshold: self.migration_quote_threshold,
            migration_base_threshold: amounts.migration_base_amount,
            migration_sqrt_price: amounts.migration_sqrt_price,
            swap_base_amount: amounts.swap_base_amount,
            initial_base_supply,
            fixed_token_supply: self.token_supply.is_some(),
            sqrt_start_price: self.sqrt_start_price,
            // validate_curve bounds the length by MAX_CURVE_POINT
            curve_point_count: self.curve.len() as u8,
            curve,
        })
    }
}

/// Log the failed invariant and reject the config
pub(crate) fn check(condition: bool, reason: &str) -> Result<()> {
    if !condition {
        msg!("Invalid config: {}", reason);
        return err!(PoolError::InvalidConfig);
    }
    Ok(())
}
