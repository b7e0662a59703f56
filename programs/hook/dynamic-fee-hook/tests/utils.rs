// Test utilities for the dynamic fee hook
//
// In-memory doubles for the pool manager, yield vaults and token custody,
// plus fixtures for a hook bound to one configured pool.

#![allow(dead_code)]

use std::collections::HashMap;

use anchor_lang::prelude::*;
use dynamic_fee_hook::{
    constants::*,
    errors::HookError,
    interfaces::*,
    math::{liquidity_amounts::get_amounts_for_liquidity, mul_div, tick_math::get_sqrt_price_at_tick, Rounding, U256},
    rehypothecation::*,
    state::*,
};

// ======================== CONSTANTS ========================

pub const NOW: i64 = 1_700_000_000;
pub const INITIAL_FEE: u32 = 3_000;
pub const INITIAL_TARGET_RATIO: u128 = 500_000_000_000_000_000; // 0.5
pub const TICK_SPACING: i32 = 60;
pub const JIT_TICK_LOWER: i32 = -600;
pub const JIT_TICK_UPPER: i32 = 600;

pub fn key(seed: u8) -> Pubkey {
    Pubkey::new_from_array([seed; 32])
}

pub fn owner() -> Pubkey {
    key(10)
}

pub fn poker() -> Pubkey {
    key(11)
}

pub fn hook_address() -> Pubkey {
    key(20)
}

pub fn pool_manager_address() -> Pubkey {
    key(21)
}

pub fn currency0() -> Pubkey {
    key(1)
}

pub fn currency1() -> Pubkey {
    key(2)
}

pub fn vault0_address() -> Pubkey {
    key(30)
}

pub fn vault1_address() -> Pubkey {
    key(31)
}

pub fn alice() -> Pubkey {
    key(40)
}

pub fn bob() -> Pubkey {
    key(41)
}

// ======================== ASSERTIONS ========================

pub fn assert_hook_error<T: std::fmt::Debug>(result: Result<T>, expected: HookError) {
    let expected: anchor_lang::error::Error = expected.into();
    match result {
        Ok(value) => panic!("Expected {:?}, got Ok({:?})", expected, value),
        Err(err) => assert_eq!(err, expected),
    }
}

// ======================== FIXTURES ========================

// Fee policy used throughout: 1bp..100bp, 5% band, 1h cooldown
pub fn default_params() -> PoolParams {
    PoolParams {
        min_fee: 100,
        max_fee: 10_000,
        base_max_fee_delta: 500,
        min_period: 3_600,
        lookback_period: 10,
        ratio_tolerance: 50_000_000_000_000_000,
        linear_slope: WAD,
        max_current_ratio: 10 * WAD,
        lower_side_factor: WAD,
        upper_side_factor: WAD,
    }
}

pub fn pool_key() -> PoolKey {
    PoolKey {
        currency0: currency0(),
        currency1: currency1(),
        fee: DYNAMIC_FEE_FLAG,
        tick_spacing: TICK_SPACING,
        hooks: hook_address(),
    }
}

pub fn fee_slot(pool: Pubkey) -> PoolFeeSlot {
    PoolFeeSlot {
        pool,
        lp_fee: 0,
        bump: 255,
    }
}

// Pool state activated with default params at NOW
pub fn configured_pool() -> (PoolState, PoolFeeSlot) {
    let pool = pool_key().id();
    let mut state = PoolState::default();
    let mut slot = fee_slot(pool);
    state
        .activate_and_configure(
            pool,
            default_params(),
            INITIAL_FEE,
            INITIAL_TARGET_RATIO,
            NOW,
            &mut slot,
        )
        .unwrap();
    (state, slot)
}

pub struct Harness {
    pub hook: RehypothecationHook,
    pub pool_manager: MockPoolManager,
    pub vaults: MockRegistry,
    pub custody: MockCustody,
}

// Hook bound and configured, no yield sources yet
pub fn setup_hook() -> Harness {
    let key = pool_key();
    let mut pool_manager = MockPoolManager::new(pool_manager_address(), key.id(), 0);
    let mut hook =
        RehypothecationHook::new(hook_address(), pool_manager_address(), owner(), WAD).unwrap();

    let price = pool_manager.slot0.sqrt_price_x96;
    hook.before_initialize(&pool_manager_address(), &key, price).unwrap();
    hook.after_initialize(&pool_manager_address(), &key, price, 0).unwrap();
    hook.activate_and_configure_pool(
        &owner(),
        &mut pool_manager,
        default_params(),
        INITIAL_FEE,
        INITIAL_TARGET_RATIO,
        JIT_TICK_LOWER,
        JIT_TICK_UPPER,
        NOW,
    )
    .unwrap();

    let mut vaults = MockRegistry::default();
    vaults.insert(vault0_address(), MockVault::new(currency0()));
    vaults.insert(vault1_address(), MockVault::new(currency1()));

    Harness {
        hook,
        pool_manager,
        vaults,
        custody: MockCustody::default(),
    }
}

// Hook with both yield sources set
pub fn setup_hook_with_sources() -> Harness {
    let mut h = setup_hook();
    h.hook
        .set_yield_source(&owner(), &currency0(), vault0_address(), &mut h.vaults)
        .unwrap();
    h.hook
        .set_yield_source(&owner(), &currency1(), vault1_address(), &mut h.vaults)
        .unwrap();
    h
}

// ======================== POOL MANAGER ========================

pub struct MockPoolManager {
    pub address: Pubkey,
    pub pool: Pubkey,
    pub slot0: Slot0,
    pub fee_updates: Vec<u32>,
    pub positions: HashMap<(Pubkey, i32, i32, [u8; 32]), u128>,
    pub deltas: HashMap<(Pubkey, Pubkey), i128>,
    pub taken: HashMap<(Pubkey, Pubkey), u128>,
    pub settled: HashMap<(Pubkey, Pubkey), u128>,
    pub currencies: (Pubkey, Pubkey),
}

impl MockPoolManager {
    pub fn new(address: Pubkey, pool: Pubkey, tick: i32) -> Self {
        Self {
            address,
            pool,
            slot0: Slot0 {
                sqrt_price_x96: get_sqrt_price_at_tick(tick).unwrap(),
                tick,
                lp_fee: 0,
            },
            fee_updates: Vec::new(),
            positions: HashMap::new(),
            deltas: HashMap::new(),
            taken: HashMap::new(),
            settled: HashMap::new(),
            currencies: (currency0(), currency1()),
        }
    }

    pub fn set_tick(&mut self, tick: i32) {
        self.slot0.tick = tick;
        self.slot0.sqrt_price_x96 = get_sqrt_price_at_tick(tick).unwrap();
    }

    fn check_pool(&self, pool: &Pubkey) -> Result<()> {
        require_keys_eq!(*pool, self.pool, HookError::InvalidPool);
        Ok(())
    }

    fn add_delta(&mut self, target: &Pubkey, currency: &Pubkey, amount: i128) {
        *self.deltas.entry((*target, *currency)).or_default() += amount;
    }
}

impl FeeManager for MockPoolManager {
    fn lp_fee(&self, pool: &Pubkey) -> Result<u32> {
        self.check_pool(pool)?;
        Ok(self.slot0.lp_fee)
    }

    fn update_dynamic_lp_fee(&mut self, pool: &Pubkey, fee: u32) -> Result<()> {
        self.check_pool(pool)?;
        self.slot0.lp_fee = fee;
        self.fee_updates.push(fee);
        Ok(())
    }
}

impl PoolManager for MockPoolManager {
    fn slot0(&self, pool: &Pubkey) -> Result<Slot0> {
        self.check_pool(pool)?;
        Ok(self.slot0)
    }

    // Adds round up against the owner, removals round down
    fn modify_liquidity(
        &mut self,
        pool: &Pubkey,
        owner: &Pubkey,
        params: &ModifyLiquidityParams,
    ) -> Result<BalanceDelta> {
        self.check_pool(pool)?;
        let position = (*owner, params.tick_lower, params.tick_upper, params.salt);
        let current = self.positions.get(&position).copied().unwrap_or_default();
        let liquidity = params.liquidity_delta.unsigned_abs();
        let adding = params.liquidity_delta > 0;

        let (amount0, amount1) = get_amounts_for_liquidity(
            self.slot0.sqrt_price_x96,
            get_sqrt_price_at_tick(params.tick_lower)?,
            get_sqrt_price_at_tick(params.tick_upper)?,
            liquidity,
            if adding { Rounding::Up } else { Rounding::Down },
        )?;

        let delta = if adding {
            self.positions.insert(position, current + liquidity);
            BalanceDelta {
                amount0: -(amount0 as i128),
                amount1: -(amount1 as i128),
            }
        } else {
            let remaining = current
                .checked_sub(liquidity)
                .ok_or(HookError::Underflow)?;
            self.positions.insert(position, remaining);
            BalanceDelta {
                amount0: amount0 as i128,
                amount1: amount1 as i128,
            }
        };

        let (c0, c1) = self.currencies;
        self.add_delta(owner, &c0, delta.amount0);
        self.add_delta(owner, &c1, delta.amount1);
        Ok(delta)
    }

    fn position_liquidity(
        &self,
        pool: &Pubkey,
        owner: &Pubkey,
        tick_lower: i32,
        tick_upper: i32,
        salt: &[u8; 32],
    ) -> u128 {
        if *pool != self.pool {
            return 0;
        }
        self.positions
            .get(&(*owner, tick_lower, tick_upper, *salt))
            .copied()
            .unwrap_or_default()
    }

    // Moves the price straight to the limit; in-range positions are revalued
    // on removal
    fn swap(&mut self, pool: &Pubkey, _sender: &Pubkey, params: &SwapParams) -> Result<BalanceDelta> {
        self.check_pool(pool)?;
        self.slot0.sqrt_price_x96 = params.sqrt_price_limit_x96;
        Ok(BalanceDelta::default())
    }

    fn currency_delta(&self, target: &Pubkey, currency: &Pubkey) -> i128 {
        self.deltas
            .get(&(*target, *currency))
            .copied()
            .unwrap_or_default()
    }

    fn take(&mut self, currency: &Pubkey, to: &Pubkey, amount: u128) -> Result<()> {
        require!(
            self.currency_delta(to, currency) >= amount as i128,
            HookError::InvalidParameter
        );
        self.add_delta(to, currency, -(amount as i128));
        *self.taken.entry((*to, *currency)).or_default() += amount;
        Ok(())
    }

    fn settle(&mut self, currency: &Pubkey, from: &Pubkey, amount: u128) -> Result<()> {
        self.add_delta(from, currency, amount as i128);
        *self.settled.entry((*from, *currency)).or_default() += amount;
        Ok(())
    }
}

// ======================== YIELD VAULTS ========================

pub struct MockVault {
    pub asset: Pubkey,
    pub total_assets: u128,
    pub total_shares: u128,
    pub shares: HashMap<Pubkey, u128>,
    pub paid_out: HashMap<Pubkey, u128>,
    pub fail_withdrawals: bool,
}

impl MockVault {
    pub fn new(asset: Pubkey) -> Self {
        Self {
            asset,
            total_assets: 0,
            total_shares: 0,
            shares: HashMap::new(),
            paid_out: HashMap::new(),
            fail_withdrawals: false,
        }
    }

    pub fn shares_of(&self, owner: &Pubkey) -> u128 {
        self.shares.get(owner).copied().unwrap_or_default()
    }

    // Interest accrues to every share holder
    pub fn accrue(&mut self, assets: u128) {
        self.total_assets += assets;
    }

    fn shares_for(&self, assets: u128, rounding: Rounding) -> u128 {
        if self.total_shares == 0 {
            assets
        } else {
            mul_div(assets, self.total_shares, self.total_assets, rounding).unwrap()
        }
    }

    fn burn_from(&mut self, owner: &Pubkey, shares: u128, assets: u128, receiver: &Pubkey) -> Result<()> {
        require!(!self.fail_withdrawals, HookError::InvalidYieldSource);
        let balance = self.shares_of(owner);
        require!(balance >= shares, HookError::InsufficientYieldShares);
        self.shares.insert(*owner, balance - shares);
        self.total_shares -= shares;
        self.total_assets -= assets;
        *self.paid_out.entry(*receiver).or_default() += assets;
        Ok(())
    }
}

impl YieldVault for MockVault {
    fn asset(&self) -> Pubkey {
        self.asset
    }

    fn convert_to_assets(&self, shares: u128) -> u128 {
        if self.total_shares == 0 {
            shares
        } else {
            mul_div(shares, self.total_assets, self.total_shares, Rounding::Down).unwrap()
        }
    }

    fn convert_to_shares(&self, assets: u128) -> u128 {
        self.shares_for(assets, Rounding::Down)
    }

    fn deposit(&mut self, assets: u128, receiver: &Pubkey) -> Result<u128> {
        let minted = self.shares_for(assets, Rounding::Down);
        *self.shares.entry(*receiver).or_default() += minted;
        self.total_shares += minted;
        self.total_assets += assets;
        Ok(minted)
    }

    fn withdraw(&mut self, assets: u128, receiver: &Pubkey, owner: &Pubkey) -> Result<u128> {
        let burned = self.shares_for(assets, Rounding::Up);
        self.burn_from(owner, burned, assets, receiver)?;
        Ok(burned)
    }

    fn redeem(&mut self, shares: u128, receiver: &Pubkey, owner: &Pubkey) -> Result<u128> {
        let assets = self.convert_to_assets(shares);
        self.burn_from(owner, shares, assets, receiver)?;
        Ok(assets)
    }
}

#[derive(Default)]
pub struct MockRegistry {
    pub vaults: HashMap<Pubkey, MockVault>,
}

impl MockRegistry {
    pub fn insert(&mut self, address: Pubkey, vault: MockVault) {
        self.vaults.insert(address, vault);
    }

    pub fn get(&self, address: &Pubkey) -> &MockVault {
        &self.vaults[address]
    }

    pub fn get_mut(&mut self, address: &Pubkey) -> &mut MockVault {
        self.vaults.get_mut(address).unwrap()
    }
}

impl VaultRegistry for MockRegistry {
    fn vault(&self, address: &Pubkey) -> Option<&dyn YieldVault> {
        self.vaults.get(address).map(|v| v as &dyn YieldVault)
    }

    fn vault_mut(&mut self, address: &Pubkey) -> Option<&mut dyn YieldVault> {
        self.vaults.get_mut(address).map(|v| v as &mut dyn YieldVault)
    }
}

// ======================== CUSTODY ========================

#[derive(Default)]
pub struct MockCustody {
    pub pulled: HashMap<(Pubkey, Pubkey), u128>,
}

impl MockCustody {
    pub fn pulled_from(&self, owner: &Pubkey, currency: &Pubkey) -> u128 {
        self.pulled
            .get(&(*owner, *currency))
            .copied()
            .unwrap_or_default()
    }
}

impl TokenCustody for MockCustody {
    fn transfer_in(&mut self, currency: &Pubkey, from: &Pubkey, amount: u128) -> Result<()> {
        *self.pulled.entry((*from, *currency)).or_default() += amount;
        Ok(())
    }
}

// ======================== JIT ========================

pub fn jit_liquidity(pool_manager: &MockPoolManager) -> u128 {
    pool_manager.position_liquidity(
        &pool_manager.pool,
        &hook_address(),
        JIT_TICK_LOWER,
        JIT_TICK_UPPER,
        &JIT_POSITION_SALT,
    )
}

pub fn swap_params(zero_for_one: bool, limit_tick: i32) -> SwapParams {
    SwapParams {
        zero_for_one,
        amount_specified: -1_000_000,
        sqrt_price_limit_x96: get_sqrt_price_at_tick(limit_tick).unwrap(),
    }
}

pub fn sqrt_price(tick: i32) -> U256 {
    get_sqrt_price_at_tick(tick).unwrap()
}
