// JIT Liquidity Coordinator
//
// Two phases per swap over a fixed tick range:
// - before: add liquidity sized from the yield-source balances, no settlement
// - after: remove whatever the position holds, then settle the net delta
//   once against the yield vaults
// Phase 1 hands back a PendingSettlement that only phase 2 can consume.

use anchor_lang::prelude::*;

use super::{share_ledger::PriceRange, yield_source::{YieldSourceState, YieldSources}};
use crate::{
    constants::*,
    errors::*,
    events::*,
    interfaces::{BalanceDelta, ModifyLiquidityParams, PoolKey, PoolManager, VaultRegistry},
    math::{liquidity_amounts::get_liquidity_for_amounts, tick_math::get_sqrt_price_at_tick},
};

// The hook owns exactly one JIT position per pool
pub const JIT_POSITION_SALT: [u8; 32] = [0u8; 32];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JitParams {
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub liquidity_delta: i128,
    pub should_execute: bool,
}

// Liquidity added before a swap whose currency delta is still open
#[must_use = "a pending settlement must be consumed by execute_after_swap"]
#[derive(Debug, PartialEq, Eq)]
pub struct PendingSettlement {
    pool: Pubkey,
    liquidity_added: i128,
    delta: BalanceDelta,
}

impl PendingSettlement {
    pub fn pool(&self) -> Pubkey {
        self.pool
    }

    pub fn liquidity_added(&self) -> i128 {
        self.liquidity_added
    }

    pub fn delta(&self) -> BalanceDelta {
        self.delta
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JitCoordinator {
    tick_lower: i32,
    tick_upper: i32,
}

impl JitCoordinator {
    pub fn new(tick_lower: i32, tick_upper: i32, tick_spacing: i32) -> Result<Self> {
        require!(tick_lower <= tick_upper, HookError::InvalidTickRange);
        require!(
            tick_lower >= MIN_TICK && tick_upper <= MAX_TICK,
            HookError::InvalidTickRange
        );
        require!(tick_spacing > 0, HookError::InvalidTickRange);
        require!(
            tick_lower % tick_spacing == 0 && tick_upper % tick_spacing == 0,
            HookError::InvalidTickRange
        );

        Ok(Self {
            tick_lower,
            tick_upper,
        })
    }

    pub fn tick_lower(&self) -> i32 {
        self.tick_lower
    }

    pub fn tick_upper(&self) -> i32 {
        self.tick_upper
    }

    // Equal ticks leave JIT switched off
    pub fn is_enabled(&self) -> bool {
        self.tick_lower != self.tick_upper
    }

    fn noop(&self) -> JitParams {
        JitParams {
            tick_lower: self.tick_lower,
            tick_upper: self.tick_upper,
            liquidity_delta: 0,
            should_execute: false,
        }
    }

    fn modify_params(&self, liquidity_delta: i128) -> ModifyLiquidityParams {
        ModifyLiquidityParams {
            tick_lower: self.tick_lower,
            tick_upper: self.tick_upper,
            liquidity_delta,
            salt: JIT_POSITION_SALT,
        }
    }

    pub fn price_range(&self, pool: &Pubkey, pool_manager: &dyn PoolManager) -> Result<PriceRange> {
        let slot0 = pool_manager.slot0(pool)?;
        Ok(PriceRange {
            sqrt_price_x96: slot0.sqrt_price_x96,
            sqrt_price_lower: get_sqrt_price_at_tick(self.tick_lower)?,
            sqrt_price_upper: get_sqrt_price_at_tick(self.tick_upper)?,
        })
    }

    pub fn compute_before_swap(
        &self,
        pool: &Pubkey,
        pool_manager: &dyn PoolManager,
        vaults: &dyn VaultRegistry,
        sources: &YieldSources,
    ) -> Result<JitParams> {
        if !sources.both_configured() || !self.is_enabled() {
            return Ok(self.noop());
        }

        let (available0, available1) = sources.amounts_available(vaults)?;
        if available0 == 0 && available1 == 0 {
            return Ok(self.noop());
        }

        let range = self.price_range(pool, pool_manager)?;
        let liquidity = get_liquidity_for_amounts(
            range.sqrt_price_x96,
            range.sqrt_price_lower,
            range.sqrt_price_upper,
            available0,
            available1,
        )?
        .saturating_sub(JIT_LIQUIDITY_MARGIN);

        if liquidity <= 1 {
            return Ok(self.noop());
        }

        Ok(JitParams {
            tick_lower: self.tick_lower,
            tick_upper: self.tick_upper,
            liquidity_delta: i128::try_from(liquidity).map_err(|_| HookError::Overflow)?,
            should_execute: true,
        })
    }

    // Adds the liquidity and leaves the resulting delta open
    pub fn execute_before_swap(
        &self,
        pool: &Pubkey,
        pool_manager: &mut dyn PoolManager,
        owner: &Pubkey,
        params: JitParams,
    ) -> Result<PendingSettlement> {
        let mut pending = PendingSettlement {
            pool: *pool,
            liquidity_added: 0,
            delta: BalanceDelta::default(),
        };
        if !params.should_execute {
            return Ok(pending);
        }

        pending.delta =
            pool_manager.modify_liquidity(pool, owner, &self.modify_params(params.liquidity_delta))?;
        pending.liquidity_added = params.liquidity_delta;

        emit!(JitLiquidityExecuted {
            pool: *pool,
            tick_lower: self.tick_lower,
            tick_upper: self.tick_upper,
            liquidity_delta: params.liquidity_delta,
        });
        msg!("JIT liquidity added: {}", params.liquidity_delta);

        Ok(pending)
    }

    // Sized from live position state; the swap may have moved the price
    pub fn compute_after_swap(&self, pool: &Pubkey, pool_manager: &dyn PoolManager, owner: &Pubkey) -> Result<JitParams> {
        let liquidity = pool_manager.position_liquidity(
            pool,
            owner,
            self.tick_lower,
            self.tick_upper,
            &JIT_POSITION_SALT,
        );
        if liquidity == 0 {
            return Ok(self.noop());
        }

        Ok(JitParams {
            tick_lower: self.tick_lower,
            tick_upper: self.tick_upper,
            liquidity_delta: -i128::try_from(liquidity).map_err(|_| HookError::Overflow)?,
            should_execute: true,
        })
    }

    // Removes the position and settles the net delta; returns what was settled
    pub fn execute_after_swap(
        &self,
        pending: PendingSettlement,
        params: JitParams,
        pool_key: &PoolKey,
        pool_manager: &mut dyn PoolManager,
        vaults: &mut dyn VaultRegistry,
        sources: &mut YieldSources,
        owner: &Pubkey,
    ) -> Result<BalanceDelta> {
        let pool = pool_key.id();
        require_keys_eq!(pending.pool, pool, HookError::InvalidPool);

        if params.should_execute {
            pool_manager.modify_liquidity(&pool, owner, &self.modify_params(params.liquidity_delta))?;

            emit!(JitLiquidityExecuted {
                pool,
                tick_lower: self.tick_lower,
                tick_upper: self.tick_upper,
                liquidity_delta: params.liquidity_delta,
            });
            msg!("JIT liquidity removed: {}", params.liquidity_delta);
        }

        let settled = self.resolve_deltas(pool_key, pool_manager, vaults, sources, owner)?;

        emit!(JitSettled {
            pool,
            amount0: settled.amount0,
            amount1: settled.amount1,
        });

        Ok(settled)
    }

    // Positive: take from the pool manager into the vault.
    // Negative: withdraw from the vault and pay the pool manager.
    fn resolve_deltas(
        &self,
        pool_key: &PoolKey,
        pool_manager: &mut dyn PoolManager,
        vaults: &mut dyn VaultRegistry,
        sources: &mut YieldSources,
        owner: &Pubkey,
    ) -> Result<BalanceDelta> {
        let amount0 = resolve_currency(
            &pool_key.currency0,
            pool_manager,
            vaults,
            &mut sources.currency0,
            owner,
        )?;
        let amount1 = resolve_currency(
            &pool_key.currency1,
            pool_manager,
            vaults,
            &mut sources.currency1,
            owner,
        )?;
        Ok(BalanceDelta { amount0, amount1 })
    }

    // Both phases and the swap in between, in one scope
    pub fn run_with_jit<R, S>(
        &self,
        pool_key: &PoolKey,
        pool_manager: &mut dyn PoolManager,
        vaults: &mut dyn VaultRegistry,
        sources: &mut YieldSources,
        owner: &Pubkey,
        swap: S,
    ) -> Result<R>
    where
        S: FnOnce(&mut dyn PoolManager) -> Result<R>,
    {
        let pool = pool_key.id();

        let before = self.compute_before_swap(&pool, &*pool_manager, &*vaults, sources)?;
        let pending = self.execute_before_swap(&pool, &mut *pool_manager, owner, before)?;

        let output = swap(&mut *pool_manager)?;

        let after = self.compute_after_swap(&pool, &*pool_manager, owner)?;
        self.execute_after_swap(pending, after, pool_key, pool_manager, vaults, sources, owner)?;

        Ok(output)
    }
}

fn resolve_currency(
    currency: &Pubkey,
    pool_manager: &mut dyn PoolManager,
    vaults: &mut dyn VaultRegistry,
    source: &mut YieldSourceState,
    owner: &Pubkey,
) -> Result<i128> {
    let delta = pool_manager.currency_delta(owner, currency);
    let amount = delta.unsigned_abs();

    if delta > 0 {
        pool_manager.take(currency, owner, amount)?;
        source.deposit(vaults, amount, owner)?;
    } else if delta < 0 {
        source.withdraw(vaults, amount, owner, owner)?;
        pool_manager.settle(currency, owner, amount)?;
    }

    Ok(delta)
}
