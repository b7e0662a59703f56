// Dynamic Fee Engine
//
// Pure functions: given the current fee, an observed activity ratio and
// the pool's target ratio, compute the next fee and the next out-of-bounds
// streak. No account access, no clock, no side effects - the preview path
// and poke must agree bit for bit.

use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::*,
    math::{clamp, mul_div, mul_div_saturating, Rounding},
    state::PoolParams,
};

// Out-of-bounds streak tracking
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OobState {
    pub last_oob_was_upper: bool,
    pub consecutive_oob_hits: u32,
}

impl OobState {
    // Streak after observing an out-of-bounds ratio on `is_upper`'s side
    pub fn record_hit(&self, is_upper: bool) -> OobState {
        let consecutive_oob_hits = if self.last_oob_was_upper == is_upper {
            self.consecutive_oob_hits.saturating_add(1)
        } else {
            1
        };
        OobState {
            last_oob_was_upper: is_upper,
            consecutive_oob_hits,
        }
    }
}

pub trait FeeEngine {
    fn compute_new_fee(
        &self,
        current_fee: u32,
        current_ratio: u128,
        target_ratio: u128,
        global_max_adj_rate: u128,
        params: &PoolParams,
        prev_oob_state: OobState,
    ) -> Result<(u32, OobState)>;

    fn ema(&self, current_ratio: u128, prev_target: u128, lookback_period: u64) -> Result<u128>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DynamicFeeEngine;

impl FeeEngine for DynamicFeeEngine {
    fn compute_new_fee(
        &self,
        current_fee: u32,
        current_ratio: u128,
        target_ratio: u128,
        global_max_adj_rate: u128,
        params: &PoolParams,
        prev_oob_state: OobState,
    ) -> Result<(u32, OobState)> {
        compute_new_fee(
            current_fee,
            current_ratio,
            target_ratio,
            global_max_adj_rate,
            params,
            prev_oob_state,
        )
    }

    fn ema(&self, current_ratio: u128, prev_target: u128, lookback_period: u64) -> Result<u128> {
        ema(current_ratio, prev_target, lookback_period)
    }
}

// Lower and upper edges of the in-bounds band around `target_ratio`
pub fn tolerance_bounds(target_ratio: u128, ratio_tolerance: u128) -> Result<(u128, u128)> {
    let offset = mul_div(target_ratio, ratio_tolerance, WAD, Rounding::Down)?;
    let lower = target_ratio.saturating_sub(offset);
    let upper = target_ratio
        .checked_add(offset)
        .ok_or(HookError::Overflow)?;
    Ok((lower, upper))
}

// Step multiplier for the n-th consecutive hit on the same side
pub fn streak_multiplier(consecutive_oob_hits: u32) -> u128 {
    consecutive_oob_hits.clamp(1, MAX_STREAK_MULTIPLIER) as u128
}

// Caller guarantees 0 < current_ratio <= params.max_current_ratio
pub fn compute_new_fee(
    current_fee: u32,
    current_ratio: u128,
    target_ratio: u128,
    global_max_adj_rate: u128,
    params: &PoolParams,
    prev_oob_state: OobState,
) -> Result<(u32, OobState)> {
    let min_fee = params.min_fee as u128;
    let max_fee = params.max_fee as u128;
    let (lower_bound, upper_bound) = tolerance_bounds(target_ratio, params.ratio_tolerance)?;

    if current_ratio >= lower_bound && current_ratio <= upper_bound {
        let fee = clamp(current_fee as u128, min_fee, max_fee);
        return Ok((fee as u32, OobState::default()));
    }

    let is_upper = current_ratio > upper_bound;
    let deviation = current_ratio.abs_diff(target_ratio);
    // A tiny target can push the fraction past u128; the rate is capped below
    let deviation_fraction = mul_div_saturating(deviation, WAD, target_ratio, Rounding::Down)?;

    let new_oob_state = prev_oob_state.record_hit(is_upper);
    let streak = streak_multiplier(new_oob_state.consecutive_oob_hits);

    let adjustment_rate =
        mul_div_saturating(deviation_fraction, params.linear_slope, WAD, Rounding::Down)?
            .min(global_max_adj_rate);
    let side_factor = if is_upper {
        params.upper_side_factor
    } else {
        params.lower_side_factor
    };

    let base_delta = params.base_max_fee_delta as u128;
    let scaled_delta = mul_div(base_delta, adjustment_rate, WAD, Rounding::Down)?;
    let sided_delta = mul_div(scaled_delta, side_factor, WAD, Rounding::Down)?;
    let fee_delta = sided_delta
        .checked_mul(streak)
        .ok_or(HookError::Overflow)?
        .min(base_delta * streak);

    let proposed = if is_upper {
        (current_fee as u128).saturating_add(fee_delta)
    } else {
        (current_fee as u128).saturating_sub(fee_delta)
    };
    let new_fee = clamp(proposed, min_fee, max_fee);

    Ok((new_fee as u32, new_oob_state))
}

// prev + ceil((current - prev) / lookback); rounds up in both directions so
// the target keeps moving until it reaches the observation, never past it
pub fn ema(current_ratio: u128, prev_target: u128, lookback_period: u64) -> Result<u128> {
    require!(lookback_period > 0, HookError::InvalidParameter);

    let lookback = lookback_period as u128;
    if current_ratio >= prev_target {
        let step = mul_div(current_ratio - prev_target, 1, lookback, Rounding::Up)?;
        Ok(prev_target.checked_add(step).ok_or(HookError::Overflow)?)
    } else {
        let step = mul_div(prev_target - current_ratio, 1, lookback, Rounding::Up)?;
        Ok(prev_target - step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> PoolParams {
        PoolParams {
            min_fee: 100,
            max_fee: 10_000,
            base_max_fee_delta: 500,
            min_period: 3_600,
            lookback_period: 10,
            ratio_tolerance: 50_000_000_000_000_000, // 5%
            linear_slope: WAD,
            max_current_ratio: 10 * WAD,
            lower_side_factor: WAD,
            upper_side_factor: WAD,
        }
    }

    const TARGET: u128 = 500_000_000_000_000_000;

    #[test]
    fn in_band_ratio_keeps_fee_and_resets_streak() {
        let prev = OobState {
            last_oob_was_upper: true,
            consecutive_oob_hits: 3,
        };
        let (fee, state) =
            compute_new_fee(3_000, 520_000_000_000_000_000, TARGET, WAD, &params(), prev).unwrap();
        assert_eq!(fee, 3_000);
        assert_eq!(state, OobState::default());
    }

    #[test]
    fn upper_oob_raises_fee() {
        let (fee, state) =
            compute_new_fee(3_000, 900_000_000_000_000_000, TARGET, WAD, &params(), OobState::default())
                .unwrap();
        // 80% deviation * 500 base delta
        assert_eq!(fee, 3_400);
        assert_eq!(
            state,
            OobState {
                last_oob_was_upper: true,
                consecutive_oob_hits: 1
            }
        );
    }

    #[test]
    fn lower_oob_cuts_fee() {
        let (fee, state) =
            compute_new_fee(3_000, 250_000_000_000_000_000, TARGET, WAD, &params(), OobState::default())
                .unwrap();
        assert_eq!(fee, 2_750);
        assert!(!state.last_oob_was_upper);
        assert_eq!(state.consecutive_oob_hits, 1);
    }

    #[test]
    fn global_rate_caps_adjustment() {
        let rate = WAD / 10;
        let (fee, _) =
            compute_new_fee(3_000, 900_000_000_000_000_000, TARGET, rate, &params(), OobState::default())
                .unwrap();
        assert_eq!(fee, 3_050);
    }

    #[test]
    fn side_factors_are_asymmetric() {
        let mut p = params();
        p.upper_side_factor = 2 * WAD;
        p.lower_side_factor = WAD / 2;
        let (up, _) =
            compute_new_fee(3_000, 750_000_000_000_000_000, TARGET, WAD, &p, OobState::default()).unwrap();
        let (down, _) =
            compute_new_fee(3_000, 250_000_000_000_000_000, TARGET, WAD, &p, OobState::default()).unwrap();
        assert_eq!(up, 3_500);
        assert_eq!(down, 2_875);
    }

    #[test]
    fn fee_is_clamped_to_pool_bounds() {
        let (fee, _) =
            compute_new_fee(9_900, 5 * WAD, TARGET, 10 * WAD, &params(), OobState::default()).unwrap();
        assert_eq!(fee, 10_000);

        let (fee, _) = compute_new_fee(150, 1, TARGET, 10 * WAD, &params(), OobState::default()).unwrap();
        assert_eq!(fee, 100);
    }

    #[test]
    fn out_of_bounds_current_fee_is_pulled_back_even_in_band() {
        let (fee, _) = compute_new_fee(50_000, TARGET, TARGET, WAD, &params(), OobState::default()).unwrap();
        assert_eq!(fee, 10_000);
    }

    #[test]
    fn streak_amplifies_until_ceiling() {
        let p = params();
        let ratio = 600_000_000_000_000_000; // 20% above target, outside 5% band
        let mut fee = 1_000;
        let mut state = OobState::default();
        let mut last_delta = 0;

        for step in 1..=8u32 {
            let (next, next_state) = compute_new_fee(fee, ratio, TARGET, WAD, &p, state).unwrap();
            let delta = next - fee;
            assert!(delta >= last_delta, "step {} shrank: {} < {}", step, delta, last_delta);
            assert_eq!(next_state.consecutive_oob_hits, step);
            last_delta = delta;
            fee = next;
            state = next_state;
        }

        // 20% of 500 = 100 per hit, capped at 5x
        assert_eq!(last_delta, 500);
    }

    #[test]
    fn side_flip_resets_to_base_step() {
        let p = params();
        let streak = OobState {
            last_oob_was_upper: true,
            consecutive_oob_hits: 4,
        };
        let (fee, state) =
            compute_new_fee(5_000, 250_000_000_000_000_000, TARGET, 10 * WAD, &p, streak).unwrap();
        assert_eq!(state.consecutive_oob_hits, 1);
        assert!(!state.last_oob_was_upper);
        assert!(5_000 - fee <= p.base_max_fee_delta);
    }

    #[test]
    fn fee_stays_within_bounds_across_ratio_grid() {
        let p = params();
        let ratios = [1, WAD / 1_000, TARGET / 2, TARGET, TARGET * 2, 3 * WAD, 10 * WAD];
        let fees = [0, 100, 3_000, 10_000, 1_000_000];
        for ratio in ratios {
            for fee in fees {
                for hits in [0, 1, 7] {
                    let prev = OobState {
                        last_oob_was_upper: ratio > TARGET,
                        consecutive_oob_hits: hits,
                    };
                    let (new_fee, _) = compute_new_fee(fee, ratio, TARGET, 10 * WAD, &p, prev).unwrap();
                    assert!(new_fee >= p.min_fee && new_fee <= p.max_fee);
                }
            }
        }
    }

    #[test]
    fn minimal_target_with_maximal_ratio_takes_full_step() {
        let mut p = params();
        p.max_current_ratio = MAX_CURRENT_RATIO;
        p.validate().unwrap();

        let (fee, state) =
            compute_new_fee(3_000, MAX_CURRENT_RATIO, MIN_TARGET_RATIO, WAD, &p, OobState::default())
                .unwrap();
        // Rate capped at 1.0, full 500 base step
        assert_eq!(fee, 3_500);
        assert!(state.last_oob_was_upper);

        let (fee, _) =
            compute_new_fee(3_000, MAX_CURRENT_RATIO, MIN_TARGET_RATIO, MAX_ADJUSTMENT_RATE, &p, state)
                .unwrap();
        assert_eq!(fee, 4_000);
    }

    #[test]
    fn ema_moves_by_one_lookback_fraction() {
        assert_eq!(ema(2_000, 1_000, 10).unwrap(), 1_100);
        assert_eq!(ema(1_000, 2_000, 10).unwrap(), 1_900);
    }

    #[test]
    fn ema_small_delta_does_not_truncate_to_zero() {
        assert_eq!(ema(1_001, 1_000, 365).unwrap(), 1_001);
        assert_eq!(ema(999, 1_000, 365).unwrap(), 999);
    }

    #[test]
    fn ema_converges_to_constant_observation() {
        let mut target = TARGET;
        let observed = 800_000_000_000_000_000;
        for _ in 0..2_000 {
            target = ema(observed, target, 10).unwrap();
        }
        assert_eq!(target, observed);
    }

    #[test]
    fn ema_rejects_zero_lookback() {
        assert!(ema(1, 2, 0).is_err());
    }
}
