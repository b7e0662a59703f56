// Rehypothecation Hook
//
// Composes the fee controller, the JIT coordinator and the share ledger for
// one pool. The host pool manager drives it through HookCallbacks; owners,
// keepers and liquidity providers call the inherent methods.
//
// Collaborators are passed per call. Every check runs before the first write
// or external call.

use anchor_lang::prelude::*;

use super::{
    jit::{JitCoordinator, PendingSettlement},
    share_ledger::{
        convert_shares_to_amounts_for_deposit, convert_shares_to_amounts_for_withdrawal,
        require_nonzero_amounts, ShareLedger,
    },
    yield_source::YieldSources,
};
use crate::{
    errors::*,
    events::*,
    fee_engine::{DynamicFeeEngine, FeeEngine},
    interfaces::*,
    math::U256,
    state::*,
};

pub trait HookCallbacks {
    fn permissions(&self) -> HookPermissions;

    fn before_initialize(&mut self, sender: &Pubkey, key: &PoolKey, sqrt_price_x96: U256) -> Result<()>;

    fn after_initialize(
        &mut self,
        sender: &Pubkey,
        key: &PoolKey,
        sqrt_price_x96: U256,
        tick: i32,
    ) -> Result<()>;

    fn before_add_liquidity(
        &mut self,
        sender: &Pubkey,
        key: &PoolKey,
        params: &ModifyLiquidityParams,
    ) -> Result<()>;

    fn after_add_liquidity(
        &mut self,
        _sender: &Pubkey,
        _key: &PoolKey,
        _params: &ModifyLiquidityParams,
        _delta: BalanceDelta,
    ) -> Result<()> {
        Ok(())
    }

    fn before_remove_liquidity(
        &mut self,
        sender: &Pubkey,
        key: &PoolKey,
        params: &ModifyLiquidityParams,
    ) -> Result<()>;

    fn after_remove_liquidity(
        &mut self,
        _sender: &Pubkey,
        _key: &PoolKey,
        _params: &ModifyLiquidityParams,
        _delta: BalanceDelta,
    ) -> Result<()> {
        Ok(())
    }

    fn before_swap(
        &mut self,
        sender: &Pubkey,
        key: &PoolKey,
        params: &SwapParams,
        pool_manager: &mut dyn PoolManager,
        vaults: &mut dyn VaultRegistry,
    ) -> Result<()>;

    fn after_swap(
        &mut self,
        sender: &Pubkey,
        key: &PoolKey,
        params: &SwapParams,
        delta: BalanceDelta,
        pool_manager: &mut dyn PoolManager,
        vaults: &mut dyn VaultRegistry,
    ) -> Result<()>;

    fn before_donate(&mut self, sender: &Pubkey, key: &PoolKey, amount0: u128, amount1: u128) -> Result<()>;

    fn after_donate(&mut self, _sender: &Pubkey, _key: &PoolKey, _amount0: u128, _amount1: u128) -> Result<()> {
        Ok(())
    }
}

pub struct RehypothecationHook<E: FeeEngine = DynamicFeeEngine> {
    address: Pubkey,
    pool_manager: Pubkey,
    engine: E,
    config: HookConfig,
    pool: PoolState,
    pool_key: Option<PoolKey>,
    jit: JitCoordinator,
    sources: YieldSources,
    ledger: ShareLedger,
    lock: ReentrancyLock,
    pending: Option<PendingSettlement>,
}

impl RehypothecationHook<DynamicFeeEngine> {
    pub fn new(address: Pubkey, pool_manager: Pubkey, owner: Pubkey, global_max_adj_rate: u128) -> Result<Self> {
        Self::with_engine(address, pool_manager, owner, global_max_adj_rate, DynamicFeeEngine)
    }
}

impl<E: FeeEngine> RehypothecationHook<E> {
    pub fn with_engine(
        address: Pubkey,
        pool_manager: Pubkey,
        owner: Pubkey,
        global_max_adj_rate: u128,
        engine: E,
    ) -> Result<Self> {
        require!(address != Pubkey::default(), HookError::InvalidAddress);
        require!(pool_manager != Pubkey::default(), HookError::InvalidAddress);

        Ok(Self {
            address,
            pool_manager,
            engine,
            config: HookConfig::new(owner, global_max_adj_rate, 0)?,
            pool: PoolState::default(),
            pool_key: None,
            jit: JitCoordinator::default(),
            sources: YieldSources::default(),
            ledger: ShareLedger::default(),
            lock: ReentrancyLock::default(),
            pending: None,
        })
    }

    /* ------------------------------- Getters ------------------------------- */

    pub fn address(&self) -> Pubkey {
        self.address
    }

    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    pub fn pool_state(&self) -> &PoolState {
        &self.pool
    }

    pub fn pool_key(&self) -> Option<PoolKey> {
        self.pool_key
    }

    pub fn jit(&self) -> &JitCoordinator {
        &self.jit
    }

    pub fn yield_sources(&self) -> &YieldSources {
        &self.sources
    }

    pub fn total_supply(&self) -> u128 {
        self.ledger.total_supply()
    }

    pub fn balance_of(&self, owner: &Pubkey) -> u128 {
        self.ledger.balance_of(owner)
    }

    pub fn has_pending_settlement(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    pub fn yield_source(&self, currency: &Pubkey) -> Result<Pubkey> {
        let key = self.bound_key()?;
        Ok(self.sources.for_currency(&key, currency)?.yield_source)
    }

    pub fn amount_in_yield_source(&self, currency: &Pubkey, vaults: &dyn VaultRegistry) -> Result<u128> {
        let key = self.bound_key()?;
        self.sources.for_currency(&key, currency)?.amount_available(vaults)
    }

    /* ------------------------------- Guards -------------------------------- */

    fn bound_key(&self) -> Result<PoolKey> {
        Ok(self.pool_key.ok_or(HookError::InvalidPool)?)
    }

    fn assert_pool_manager(&self, sender: &Pubkey) -> Result<()> {
        require_keys_eq!(*sender, self.pool_manager, HookError::NotPoolManager);
        Ok(())
    }

    fn assert_bound_pool(&self, key: &PoolKey) -> Result<PoolKey> {
        let bound = self.bound_key()?;
        require!(bound == *key, HookError::InvalidPool);
        Ok(bound)
    }

    fn assert_no_pending(&self) -> Result<()> {
        require!(self.pending.is_none(), HookError::JitSettlementPending);
        Ok(())
    }

    fn locked<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.lock.acquire()?;
        let result = f(self);
        self.lock.release();
        result
    }

    /* ----------------------------- Hook admin ------------------------------ */

    pub fn set_global_max_adj_rate(&mut self, caller: &Pubkey, rate: u128) -> Result<()> {
        self.config.assert_is_owner(caller)?;
        let old_rate = self.config.set_global_max_adj_rate(rate)?;

        emit!(GlobalMaxAdjRateUpdated {
            old_rate,
            new_rate: rate,
        });
        Ok(())
    }

    pub fn set_poker(&mut self, caller: &Pubkey, poker: Pubkey) -> Result<()> {
        self.config.assert_is_owner(caller)?;
        let old_poker = self.config.poker;
        self.config.set_poker(poker)?;

        emit!(PokerUpdated {
            old_poker,
            new_poker: poker,
        });
        Ok(())
    }

    pub fn pause(&mut self, caller: &Pubkey) -> Result<()> {
        self.config.assert_is_owner(caller)?;
        self.config.pause()?;

        emit!(HookPaused { by: *caller });
        msg!("Hook paused by {}", caller);
        Ok(())
    }

    pub fn unpause(&mut self, caller: &Pubkey) -> Result<()> {
        self.config.assert_is_owner(caller)?;
        self.config.unpause()?;

        emit!(HookUnpaused { by: *caller });
        msg!("Hook unpaused by {}", caller);
        Ok(())
    }

    /* --------------------------- Fee controller ---------------------------- */

    // Also fixes the JIT tick range for the life of the pool
    #[allow(clippy::too_many_arguments)]
    pub fn activate_and_configure_pool(
        &mut self,
        caller: &Pubkey,
        pool_manager: &mut dyn PoolManager,
        params: PoolParams,
        initial_fee: u32,
        initial_target_ratio: u128,
        tick_lower: i32,
        tick_upper: i32,
        now: i64,
    ) -> Result<()> {
        self.config.assert_is_owner(caller)?;
        let key = self.bound_key()?;
        let jit = JitCoordinator::new(tick_lower, tick_upper, key.tick_spacing)?;

        self.pool.activate_and_configure(
            key.id(),
            params,
            initial_fee,
            initial_target_ratio,
            now,
            pool_manager,
        )?;
        self.jit = jit;

        msg!("JIT range fixed at [{}, {}]", tick_lower, tick_upper);
        Ok(())
    }

    pub fn activate_pool(&mut self, caller: &Pubkey) -> Result<()> {
        self.config.assert_is_owner(caller)?;
        self.pool.activate()
    }

    pub fn deactivate_pool(&mut self, caller: &Pubkey) -> Result<()> {
        self.config.assert_is_owner(caller)?;
        self.pool.deactivate()
    }

    pub fn set_pool_params(&mut self, caller: &Pubkey, params: PoolParams) -> Result<()> {
        self.config.assert_is_owner(caller)?;
        self.config.assert_not_paused()?;
        self.pool.set_params(params)
    }

    pub fn poke(
        &mut self,
        caller: &Pubkey,
        pool_manager: &mut dyn PoolManager,
        current_ratio: u128,
        now: i64,
    ) -> Result<FeeUpdate> {
        self.config.assert_not_paused()?;
        self.config.assert_can_poke(caller)?;

        self.locked(|hook| {
            let rate = hook.config.global_max_adj_rate;
            hook.pool
                .poke(&hook.engine, current_ratio, rate, now, pool_manager)
        })
    }

    pub fn compute_fee_update(
        &self,
        pool_manager: &dyn PoolManager,
        current_ratio: u128,
        now: i64,
    ) -> Result<FeeUpdatePreview> {
        self.pool.compute_fee_update(
            &self.engine,
            current_ratio,
            self.config.global_max_adj_rate,
            now,
            pool_manager,
        )
    }

    /* --------------------------- Yield sources ----------------------------- */

    pub fn set_yield_source(
        &mut self,
        caller: &Pubkey,
        currency: &Pubkey,
        yield_source: Pubkey,
        vaults: &mut dyn VaultRegistry,
    ) -> Result<()> {
        self.config.assert_is_owner(caller)?;
        self.config.assert_not_paused()?;
        self.assert_no_pending()?;
        let key = self.bound_key()?;
        require!(key.contains(currency), HookError::InvalidCurrency);
        require!(yield_source != Pubkey::default(), HookError::InvalidAddress);

        let vault = vaults
            .vault(&yield_source)
            .ok_or(HookError::InvalidYieldSource)?;
        require_keys_eq!(vault.asset(), *currency, HookError::InvalidYieldSource);

        self.locked(|hook| {
            let address = hook.address;
            let source = hook.sources.for_currency_mut(&key, currency)?;
            let old_yield_source = source.yield_source;
            let migrated_assets = source.migrate(vaults, yield_source, &address)?;

            emit!(YieldSourceUpdated {
                currency: *currency,
                old_yield_source,
                new_yield_source: yield_source,
                migrated_assets,
            });
            msg!(
                "Yield source for {} set to {} ({} assets migrated)",
                currency,
                yield_source,
                migrated_assets
            );
            Ok(())
        })
    }

    /* ------------------------- Rehypothecated LPs -------------------------- */

    // Returns the amounts pulled from `caller`
    pub fn add_rehypothecated_liquidity(
        &mut self,
        caller: &Pubkey,
        shares: u128,
        pool_manager: &dyn PoolManager,
        vaults: &mut dyn VaultRegistry,
        custody: &mut dyn TokenCustody,
    ) -> Result<(u128, u128)> {
        self.config.assert_not_paused()?;
        self.assert_no_pending()?;
        require!(shares > 0, HookError::ZeroShares);
        let key = self.bound_key()?;
        self.pool.assert_configured()?;
        require!(
            self.sources.both_configured(),
            HookError::YieldSourceNotConfigured
        );

        let range = self.jit.price_range(&key.id(), pool_manager)?;
        let in_vault = self.sources.amounts_available(&*vaults)?;
        // The deposit margins keep both sides >= 1; same guard as withdrawals
        let (amount0, amount1) = require_nonzero_amounts(convert_shares_to_amounts_for_deposit(
            shares,
            self.ledger.total_supply(),
            in_vault,
            &range,
        )?)?;

        self.locked(|hook| {
            let address = hook.address;
            if amount0 > 0 {
                custody.transfer_in(&key.currency0, caller, amount0)?;
            }
            if amount1 > 0 {
                custody.transfer_in(&key.currency1, caller, amount1)?;
            }
            hook.sources.currency0.deposit(vaults, amount0, &address)?;
            hook.sources.currency1.deposit(vaults, amount1, &address)?;
            hook.ledger.mint(caller, shares)?;

            emit!(ReHypothecatedLiquidityAdded {
                owner: *caller,
                shares,
                amount0,
                amount1,
            });
            msg!("Minted {} shares for {} / {}", shares, amount0, amount1);
            Ok((amount0, amount1))
        })
    }

    // Returns the amounts sent to `caller`
    pub fn remove_rehypothecated_liquidity(
        &mut self,
        caller: &Pubkey,
        shares: u128,
        vaults: &mut dyn VaultRegistry,
    ) -> Result<(u128, u128)> {
        self.config.assert_not_paused()?;
        self.assert_no_pending()?;
        require!(shares > 0, HookError::ZeroShares);
        require!(
            shares <= self.ledger.balance_of(caller),
            HookError::InsufficientShares
        );

        let in_vault = self.sources.amounts_available(&*vaults)?;
        let (amount0, amount1) = require_nonzero_amounts(convert_shares_to_amounts_for_withdrawal(
            shares,
            self.ledger.total_supply(),
            in_vault,
        )?)?;

        self.locked(|hook| {
            let address = hook.address;
            hook.ledger.burn(caller, shares)?;
            hook.sources.currency0.withdraw(vaults, amount0, caller, &address)?;
            hook.sources.currency1.withdraw(vaults, amount1, caller, &address)?;

            emit!(ReHypothecatedLiquidityRemoved {
                owner: *caller,
                shares,
                amount0,
                amount1,
            });
            msg!("Burned {} shares for {} / {}", shares, amount0, amount1);
            Ok((amount0, amount1))
        })
    }

    pub fn transfer_shares(&mut self, caller: &Pubkey, to: &Pubkey, shares: u128) -> Result<()> {
        self.config.assert_not_paused()?;
        self.assert_no_pending()?;
        self.ledger.transfer(caller, to, shares)
    }

    /* -------------------------------- Swaps -------------------------------- */

    fn assert_can_swap(&self, sender: &Pubkey, key: &PoolKey) -> Result<PoolKey> {
        self.assert_pool_manager(sender)?;
        let key = self.assert_bound_pool(key)?;
        self.config.assert_not_paused()?;
        self.pool.assert_active()?;
        self.assert_no_pending()?;
        Ok(key)
    }

    // Runs `swap` between both JIT phases without exposing the pending state
    pub fn swap_with_jit<R, S>(
        &mut self,
        sender: &Pubkey,
        key: &PoolKey,
        pool_manager: &mut dyn PoolManager,
        vaults: &mut dyn VaultRegistry,
        swap: S,
    ) -> Result<R>
    where
        S: FnOnce(&mut dyn PoolManager) -> Result<R>,
    {
        let key = self.assert_can_swap(sender, key)?;

        self.locked(|hook| {
            let jit = hook.jit;
            let address = hook.address;
            jit.run_with_jit(&key, pool_manager, vaults, &mut hook.sources, &address, swap)
        })
    }
}

impl<E: FeeEngine> HookCallbacks for RehypothecationHook<E> {
    fn permissions(&self) -> HookPermissions {
        HookPermissions {
            before_initialize: true,
            after_initialize: true,
            before_add_liquidity: true,
            after_add_liquidity: false,
            before_remove_liquidity: true,
            after_remove_liquidity: false,
            before_swap: true,
            after_swap: true,
            before_donate: true,
            after_donate: false,
        }
    }

    fn before_initialize(&mut self, sender: &Pubkey, key: &PoolKey, _sqrt_price_x96: U256) -> Result<()> {
        self.assert_pool_manager(sender)?;
        require_keys_eq!(key.hooks, self.address, HookError::InvalidPool);
        require!(key.is_dynamic_fee(), HookError::NotDynamicFee);
        key.validate()?;
        require!(self.pool_key.is_none(), HookError::PoolAlreadyInitialized);
        Ok(())
    }

    // Binds the pool; it stays unconfigured until the owner activates it
    fn after_initialize(&mut self, sender: &Pubkey, key: &PoolKey, _sqrt_price_x96: U256, tick: i32) -> Result<()> {
        self.assert_pool_manager(sender)?;
        require_keys_eq!(key.hooks, self.address, HookError::InvalidPool);
        require!(self.pool_key.is_none(), HookError::PoolAlreadyInitialized);

        self.pool_key = Some(*key);
        msg!("Hook bound to pool {} at tick {}", key.id(), tick);
        Ok(())
    }

    fn before_add_liquidity(
        &mut self,
        sender: &Pubkey,
        key: &PoolKey,
        _params: &ModifyLiquidityParams,
    ) -> Result<()> {
        self.assert_pool_manager(sender)?;
        self.assert_bound_pool(key)?;
        self.config.assert_not_paused()?;
        self.pool.assert_active()
    }

    // Exits stay open while the pool is inactive
    fn before_remove_liquidity(
        &mut self,
        sender: &Pubkey,
        key: &PoolKey,
        _params: &ModifyLiquidityParams,
    ) -> Result<()> {
        self.assert_pool_manager(sender)?;
        self.assert_bound_pool(key)?;
        self.config.assert_not_paused()
    }

    fn before_swap(
        &mut self,
        sender: &Pubkey,
        key: &PoolKey,
        _params: &SwapParams,
        pool_manager: &mut dyn PoolManager,
        vaults: &mut dyn VaultRegistry,
    ) -> Result<()> {
        let key = self.assert_can_swap(sender, key)?;

        self.locked(|hook| {
            let pool = key.id();
            let params = hook
                .jit
                .compute_before_swap(&pool, &*pool_manager, &*vaults, &hook.sources)?;
            let pending = hook
                .jit
                .execute_before_swap(&pool, pool_manager, &hook.address, params)?;
            hook.pending = Some(pending);
            Ok(())
        })
    }

    fn after_swap(
        &mut self,
        sender: &Pubkey,
        key: &PoolKey,
        _params: &SwapParams,
        _delta: BalanceDelta,
        pool_manager: &mut dyn PoolManager,
        vaults: &mut dyn VaultRegistry,
    ) -> Result<()> {
        self.assert_pool_manager(sender)?;
        let key = self.assert_bound_pool(key)?;
        require!(self.pending.is_some(), HookError::NoPendingSettlement);

        self.locked(|hook| {
            let pending = hook.pending.take().ok_or(HookError::NoPendingSettlement)?;
            let jit = hook.jit;
            let address = hook.address;
            let params = jit.compute_after_swap(&key.id(), &*pool_manager, &address)?;
            jit.execute_after_swap(
                pending,
                params,
                &key,
                pool_manager,
                vaults,
                &mut hook.sources,
                &address,
            )?;
            Ok(())
        })
    }

    fn before_donate(&mut self, sender: &Pubkey, key: &PoolKey, _amount0: u128, _amount1: u128) -> Result<()> {
        self.assert_pool_manager(sender)?;
        self.assert_bound_pool(key)?;
        self.config.assert_not_paused()?;
        self.pool.assert_active()
    }
}
