use anchor_lang::prelude::*;

/* ----------------------------- Fee controller ----------------------------- */

#[event]
pub struct FeeUpdated {
    pub pool: Pubkey,
    pub old_fee: u32,
    pub new_fee: u32,
    pub old_target_ratio: u128,
    pub new_target_ratio: u128,
    pub last_oob_was_upper: bool,
    pub consecutive_oob_hits: u32,
    pub timestamp: i64,
}

#[event]
pub struct PoolConfigured {
    pub pool: Pubkey,
    pub initial_fee: u32,
    pub initial_target_ratio: u128,
    pub min_fee: u32,
    pub max_fee: u32,
}

#[event]
pub struct PoolActivated {
    pub pool: Pubkey,
}

#[event]
pub struct PoolDeactivated {
    pub pool: Pubkey,
}

#[event]
pub struct PoolParamsUpdated {
    pub pool: Pubkey,
    pub min_fee: u32,
    pub max_fee: u32,
    pub min_period: u64,
    pub max_current_ratio: u128,
    pub target_ratio: u128,
}

/* ------------------------------- Hook admin ------------------------------- */

#[event]
pub struct GlobalMaxAdjRateUpdated {
    pub old_rate: u128,
    pub new_rate: u128,
}

#[event]
pub struct PokerUpdated {
    pub old_poker: Pubkey,
    pub new_poker: Pubkey,
}

#[event]
pub struct HookPaused {
    pub by: Pubkey,
}

#[event]
pub struct HookUnpaused {
    pub by: Pubkey,
}

/* ----------------------------- Rehypothecation ---------------------------- */

#[event]
pub struct YieldSourceUpdated {
    pub currency: Pubkey,
    pub old_yield_source: Pubkey,
    pub new_yield_source: Pubkey,
    pub migrated_assets: u128,
}

#[event]
pub struct ReHypothecatedLiquidityAdded {
    pub owner: Pubkey,
    pub shares: u128,
    pub amount0: u128,
    pub amount1: u128,
}

#[event]
pub struct ReHypothecatedLiquidityRemoved {
    pub owner: Pubkey,
    pub shares: u128,
    pub amount0: u128,
    pub amount1: u128,
}

#[event]
pub struct JitLiquidityExecuted {
    pub pool: Pubkey,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub liquidity_delta: i128,
}

#[event]
pub struct JitSettled {
    pub pool: Pubkey,
    pub amount0: i128,
    pub amount1: i128,
}
