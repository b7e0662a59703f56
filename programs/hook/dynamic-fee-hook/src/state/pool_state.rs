// Pool Controller State
//
// One account per pool: Unconfigured -> Active <-> Inactive.
// The live fee is owned by the fee manager and only read back here.

use anchor_lang::prelude::*;

use super::{
    guards::{LifecycleGuard, PoolLifecycle},
    pool_params::PoolParams,
};
use crate::{
    constants::*,
    errors::*,
    events::*,
    fee_engine::{FeeEngine, OobState},
    interfaces::FeeManager,
    math::clamp,
};

#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolConfig {
    pub initial_fee: u32,
    pub initial_target_ratio: u128,
    pub is_configured: bool,
}

#[account]
#[derive(InitSpace, Debug, Default)]
pub struct PoolState {
    pub pool: Pubkey,               // Host pool id
    pub params: PoolParams,         // Owner-set fee policy
    pub config: PoolConfig,         // Values fixed at activation
    pub active: bool,               // Pokes and swaps allowed
    pub target_ratio: u128,         // EMA-smoothed reference ratio (WAD)
    pub oob_state: OobState,        // Out-of-bounds streak
    pub last_fee_update: i64,       // Unix timestamp of the last poke
    pub bump: u8,                   // PDA bump
}

// Result of an applied poke
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeUpdate {
    pub old_fee: u32,
    pub new_fee: u32,
    pub old_target_ratio: u128,
    pub new_target_ratio: u128,
    pub oob_state: OobState,
}

// What a poke with the same ratio would do right now
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeUpdatePreview {
    pub new_fee: u32,
    pub new_oob_state: OobState,
    pub new_target_ratio: u128,
    pub would_apply: bool,
}

impl PoolState {
    pub fn activate_and_configure<F: FeeManager + ?Sized>(
        &mut self,
        pool: Pubkey,
        params: PoolParams,
        initial_fee: u32,
        initial_target_ratio: u128,
        now: i64,
        fees: &mut F,
    ) -> Result<()> {
        self.assert_unconfigured()?;
        params.validate()?;
        require!(params.contains_fee(initial_fee), HookError::InvalidFee);
        require!(
            params.is_valid_ratio(initial_target_ratio),
            HookError::InvalidRatio
        );

        fees.update_dynamic_lp_fee(&pool, initial_fee)?;

        self.pool = pool;
        self.params = params;
        self.config = PoolConfig {
            initial_fee,
            initial_target_ratio,
            is_configured: true,
        };
        self.active = true;
        self.target_ratio = initial_target_ratio;
        self.oob_state = OobState::default();
        self.last_fee_update = now;

        emit!(PoolConfigured {
            pool,
            initial_fee,
            initial_target_ratio,
            min_fee: params.min_fee,
            max_fee: params.max_fee,
        });
        msg!(
            "Pool {} configured: fee {}, target ratio {}",
            pool,
            initial_fee,
            initial_target_ratio
        );

        Ok(())
    }

    pub fn activate(&mut self) -> Result<()> {
        self.assert_configured()?;
        require!(!self.active, HookError::PoolAlreadyActive);
        self.active = true;

        emit!(PoolActivated { pool: self.pool });
        Ok(())
    }

    pub fn deactivate(&mut self) -> Result<()> {
        self.assert_configured()?;
        require!(self.active, HookError::PoolNotActive);
        self.active = false;

        emit!(PoolDeactivated { pool: self.pool });
        Ok(())
    }

    // Earliest timestamp at which the next poke is accepted
    pub fn next_poke_at(&self) -> Result<i64> {
        let min_period = i64::try_from(self.params.min_period).map_err(|_| HookError::Overflow)?;
        Ok(self
            .last_fee_update
            .checked_add(min_period)
            .ok_or(HookError::Overflow)?)
    }

    pub fn poke<E, F>(
        &mut self,
        engine: &E,
        current_ratio: u128,
        global_max_adj_rate: u128,
        now: i64,
        fees: &mut F,
    ) -> Result<FeeUpdate>
    where
        E: FeeEngine + ?Sized,
        F: FeeManager + ?Sized,
    {
        self.assert_active()?;
        let next_allowed = self.next_poke_at()?;
        require_gte!(now, next_allowed, HookError::CooldownNotElapsed);
        require!(
            self.params.is_valid_ratio(current_ratio),
            HookError::InvalidRatio
        );

        let old_fee = fees.lp_fee(&self.pool)?;
        let old_target_ratio = self.target_ratio;
        let (new_fee, new_oob_state, new_target_ratio) =
            self.evaluate(engine, old_fee, current_ratio, global_max_adj_rate)?;

        if new_fee != old_fee {
            fees.update_dynamic_lp_fee(&self.pool, new_fee)?;
        }

        self.target_ratio = new_target_ratio;
        self.oob_state = new_oob_state;
        self.last_fee_update = now;

        emit!(FeeUpdated {
            pool: self.pool,
            old_fee,
            new_fee,
            old_target_ratio,
            new_target_ratio,
            last_oob_was_upper: new_oob_state.last_oob_was_upper,
            consecutive_oob_hits: new_oob_state.consecutive_oob_hits,
            timestamp: now,
        });
        msg!(
            "Poke: ratio {} fee {} -> {}, target {} -> {}",
            current_ratio,
            old_fee,
            new_fee,
            old_target_ratio,
            new_target_ratio
        );

        Ok(FeeUpdate {
            old_fee,
            new_fee,
            old_target_ratio,
            new_target_ratio,
            oob_state: new_oob_state,
        })
    }

    // Read-only twin of poke
    pub fn compute_fee_update<E, F>(
        &self,
        engine: &E,
        current_ratio: u128,
        global_max_adj_rate: u128,
        now: i64,
        fees: &F,
    ) -> Result<FeeUpdatePreview>
    where
        E: FeeEngine + ?Sized,
        F: FeeManager + ?Sized,
    {
        self.assert_configured()?;
        require!(
            self.params.is_valid_ratio(current_ratio),
            HookError::InvalidRatio
        );

        let current_fee = fees.lp_fee(&self.pool)?;
        let (new_fee, new_oob_state, new_target_ratio) =
            self.evaluate(engine, current_fee, current_ratio, global_max_adj_rate)?;

        Ok(FeeUpdatePreview {
            new_fee,
            new_oob_state,
            new_target_ratio,
            would_apply: self.active && now >= self.next_poke_at()?,
        })
    }

    pub fn set_params(&mut self, params: PoolParams) -> Result<()> {
        self.assert_configured()?;
        params.validate()?;

        self.params = params;
        // Keep the target under a lowered ceiling
        if self.target_ratio > params.max_current_ratio {
            self.target_ratio = params.max_current_ratio;
        }

        emit!(PoolParamsUpdated {
            pool: self.pool,
            min_fee: params.min_fee,
            max_fee: params.max_fee,
            min_period: params.min_period,
            max_current_ratio: params.max_current_ratio,
            target_ratio: self.target_ratio,
        });
        Ok(())
    }

    fn evaluate<E: FeeEngine + ?Sized>(
        &self,
        engine: &E,
        current_fee: u32,
        current_ratio: u128,
        global_max_adj_rate: u128,
    ) -> Result<(u32, OobState, u128)> {
        let (new_fee, new_oob_state) = engine.compute_new_fee(
            current_fee,
            current_ratio,
            self.target_ratio,
            global_max_adj_rate,
            &self.params,
            self.oob_state,
        )?;
        let smoothed = engine.ema(current_ratio, self.target_ratio, self.params.lookback_period)?;
        let new_target_ratio = clamp(smoothed, MIN_TARGET_RATIO, self.params.max_current_ratio);

        Ok((new_fee, new_oob_state, new_target_ratio))
    }
}

impl LifecycleGuard for PoolState {
    fn lifecycle(&self) -> PoolLifecycle {
        match (self.config.is_configured, self.active) {
            (false, _) => PoolLifecycle::Unconfigured,
            (true, true) => PoolLifecycle::Active,
            (true, false) => PoolLifecycle::Inactive,
        }
    }
}
