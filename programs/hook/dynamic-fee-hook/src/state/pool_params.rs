// Pool Parameters
//
// Owner-set fee policy for one pool. Validated on every write against the
// global bounds in constants.rs.

use anchor_lang::prelude::*;

use crate::{constants::*, errors::*};

#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolParams {
    pub min_fee: u32,              // Fee floor (hundredths of a bip)
    pub max_fee: u32,              // Fee ceiling
    pub base_max_fee_delta: u32,   // Largest un-amplified step per poke
    pub min_period: u64,           // Cooldown between pokes (seconds)
    pub lookback_period: u64,      // EMA window (pokes)
    pub ratio_tolerance: u128,     // Half-width of the in-bounds band (WAD fraction)
    pub linear_slope: u128,        // Fee sensitivity to deviation (WAD)
    pub max_current_ratio: u128,   // Ceiling on reported and target ratios (WAD)
    pub lower_side_factor: u128,   // Multiplier when below the band (WAD)
    pub upper_side_factor: u128,   // Multiplier when above the band (WAD)
}

impl PoolParams {
    pub fn validate(&self) -> Result<()> {
        // Fee bounds
        require!(self.min_fee >= MIN_FEE, HookError::InvalidFee);
        require!(self.min_fee <= self.max_fee, HookError::InvalidFee);
        require!(self.max_fee <= MAX_FEE, HookError::InvalidFee);

        require!(
            self.base_max_fee_delta >= 1 && self.base_max_fee_delta <= MAX_FEE,
            HookError::InvalidParameter
        );

        require!(
            (MIN_PERIOD..=MAX_PERIOD).contains(&self.min_period),
            HookError::InvalidParameter
        );
        require!(
            (MIN_LOOKBACK_PERIOD..=MAX_LOOKBACK_PERIOD).contains(&self.lookback_period),
            HookError::InvalidParameter
        );
        require!(
            (MIN_RATIO_TOLERANCE..=MAX_RATIO_TOLERANCE).contains(&self.ratio_tolerance),
            HookError::InvalidParameter
        );

        // Multipliers share the [0.1x, 10x] band
        for multiplier in [
            self.linear_slope,
            self.lower_side_factor,
            self.upper_side_factor,
        ] {
            require!(
                (MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&multiplier),
                HookError::InvalidParameter
            );
        }

        require!(
            self.max_current_ratio > 0 && self.max_current_ratio <= MAX_CURRENT_RATIO,
            HookError::InvalidParameter
        );

        Ok(())
    }

    pub fn contains_fee(&self, fee: u32) -> bool {
        fee >= self.min_fee && fee <= self.max_fee
    }

    // Reported ratios must be positive and under the sanity ceiling
    pub fn is_valid_ratio(&self, ratio: u128) -> bool {
        ratio > 0 && ratio <= self.max_current_ratio
    }
}
