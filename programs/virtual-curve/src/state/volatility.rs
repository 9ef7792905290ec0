//! Volatility tracking for the dynamic fee
//!
//! References are refreshed before a swap and the accumulator is updated
//! from the post-swap price, so a burst of trades inside the filter period
//! compounds while a quiet pool decays back towards zero.

use anchor_lang::prelude::*;
use ethnum::U256;

use crate::constants::{BASIS_POINT_MAX, ONE_Q64, RESOLUTION};
use crate::state::DynamicFeeConfig;
use crate::utils::{shl_div_u256, u256_to_u128, Rounding, SafeMath};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace,
)]
pub struct VolatilityTracker {
    pub last_update_timestamp: u64,
    pub sqrt_price_reference: u128,
    pub volatility_accumulator: u128,
    pub volatility_reference: u128,
}

impl VolatilityTracker {
    pub fn update_references(
        &mut self,
        config: &DynamicFeeConfig,
        sqrt_price: u128,
        current_timestamp: u64,
    ) -> Result<()> {
        let elapsed = current_timestamp.saturating_sub(self.last_update_timestamp);
        if elapsed >= u64::from(config.filter_period) {
            self.sqrt_price_reference = sqrt_price;
            self.volatility_reference = if elapsed < u64::from(config.decay_period) {
                self.volatility_accumulator
                    .safe_mul(u128::from(config.reduction_factor))?
                    .safe_div(u128::from(BASIS_POINT_MAX))?
            } else {
                0
            };
        }
        Ok(())
    }

    pub fn update_volatility_accumulator(
        &mut self,
        config: &DynamicFeeConfig,
        sqrt_price: u128,
    ) -> Result<()> {
        let delta_bin_id =
            get_delta_bin_id(config.bin_step_u128, self.sqrt_price_reference, sqrt_price)?;
        let accumulator = U256::from(self.volatility_reference)
            + delta_bin_id * U256::from(BASIS_POINT_MAX);
        let cap = U256::from(config.max_volatility_accumulator);
        self.volatility_accumulator = u256_to_u128(accumulator.min(cap))?;
        Ok(())
    }
}

/// Number of bins between two sqrt prices, doubled to express price bins
fn get_delta_bin_id(bin_step_u128: u128, sqrt_price_a: u128, sqrt_price_b: u128) -> Result<U256> {
    let (upper, lower) = if sqrt_price_a > sqrt_price_b {
        (sqrt_price_a, sqrt_price_b)
    } else {
        (sqrt_price_b, sqrt_price_a)
    };
    if lower == 0 || bin_step_u128 == 0 {
        return Ok(U256::ZERO);
    }
    let price_ratio = shl_div_u256(upper, lower, RESOLUTION, Rounding::Down)?;
    let delta_bin_id = (price_ratio - U256::from(ONE_Q64)) / U256::from(bin_step_u128);
    Ok(delta_bin_id * U256::from(2u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dynamic_config() -> DynamicFeeConfig {
        crate::state::DynamicFeeParameters {
            bin_step: 1,
            filter_period: 10,
            decay_period: 120,
            reduction_factor: 5_000,
            max_volatility_accumulator: 14_460_000,
            variable_fee_control: 2_000_000,
        }
        .to_config()
    }

    #[test]
    fn test_accumulator_grows_with_price_move() {
        let config = dynamic_config();
        let mut tracker = VolatilityTracker::default();
        tracker.update_references(&config, ONE_Q64, 1_000).unwrap();
        assert_eq!(tracker.sqrt_price_reference, ONE_Q64);

        // 1% sqrt price move is 100 bins of 1bp, doubled
        tracker
            .update_volatility_accumulator(&config, ONE_Q64 + ONE_Q64 / 100)
            .unwrap();
        let bins = tracker.volatility_accumulator / u128::from(BASIS_POINT_MAX);
        assert!((199..=200).contains(&bins), "bins = {}", bins);
    }

    #[test]
    fn test_reference_decays() {
        let config = dynamic_config();
        let mut tracker = VolatilityTracker {
            last_update_timestamp: 1_000,
            sqrt_price_reference: ONE_Q64,
            volatility_accumulator: 40_000,
            volatility_reference: 0,
        };

        // Inside the filter period nothing moves
        tracker.update_references(&config, 2 * ONE_Q64, 1_005).unwrap();
        assert_eq!(tracker.sqrt_price_reference, ONE_Q64);
        assert_eq!(tracker.volatility_reference, 0);

        // Between filter and decay the reference keeps half the accumulator
        tracker.update_references(&config, 2 * ONE_Q64, 1_050).unwrap();
        assert_eq!(tracker.sqrt_price_reference, 2 * ONE_Q64);
        assert_eq!(tracker.volatility_reference, 20_000);

        // After decay it resets
        tracker.update_references(&config, 2 * ONE_Q64, 2_000).unwrap();
        assert_eq!(tracker.volatility_reference, 0);
    }

    #[test]
    fn test_accumulator_is_capped() {
        let config = dynamic_config();
        let mut tracker = VolatilityTracker {
            sqrt_price_reference: ONE_Q64,
            ..Default::default()
        };
        tracker
            .update_volatility_accumulator(&config, 4 * ONE_Q64)
            .unwrap();
        assert_eq!(
            tracker.volatility_accumulator,
            u128::from(config.max_volatility_accumulator)
        );
    }
}
