
use anchor_lang::prelude::*;

#[error_code]
pub enum HookError {
    // Validation

    #[msg("Address cannot be the default pubkey")]
    InvalidAddress,

    #[msg("Fee is outside the allowed bounds")]
    InvalidFee,

    #[msg("Ratio must be positive and not exceed the pool's max current ratio")]
    InvalidRatio,

    #[msg("Parameter is outside the allowed bounds")]
    InvalidParameter,

    #[msg("Tick range is out of bounds or not aligned to tick spacing")]
    InvalidTickRange,

    #[msg("Currency is not part of this pool")]
    InvalidCurrency,

    #[msg("Yield source does not exist or holds a different asset")]
    InvalidYieldSource,

    #[msg("Pool key does not carry the dynamic fee flag")]
    NotDynamicFee,

    #[msg("Pool does not belong to this hook")]
    InvalidPool,

    #[msg("Share amount cannot be zero")]
    ZeroShares,

    #[msg("Both currency amounts round to zero")]
    ZeroAmounts,

    #[msg("Share balance is lower than the requested amount")]
    InsufficientShares,

    // Lifecycle

    #[msg("Pool has not been configured")]
    PoolNotConfigured,

    #[msg("Pool is already configured")]
    PoolAlreadyConfigured,

    #[msg("Pool is not active")]
    PoolNotActive,

    #[msg("Pool is already active")]
    PoolAlreadyActive,

    #[msg("Hook is already bound to a pool")]
    PoolAlreadyInitialized,

    #[msg("Hook is paused - operations are disabled")]
    HookPaused,

    #[msg("Hook is already paused")]
    HookAlreadyPaused,

    #[msg("Hook is not paused")]
    HookNotPaused,

    #[msg("A JIT settlement is still outstanding")]
    JitSettlementPending,

    #[msg("No JIT settlement is outstanding")]
    NoPendingSettlement,

    #[msg("Reentrant call rejected")]
    Reentrancy,

    // Timing

    #[msg("Fee cooldown has not elapsed")]
    CooldownNotElapsed,

    // Authorization

    #[msg("Only the hook owner can perform this action")]
    UnauthorizedAccess,

    #[msg("Caller is not the pool manager")]
    NotPoolManager,

    // External dependencies

    #[msg("Yield source is not configured for this currency")]
    YieldSourceNotConfigured,

    #[msg("Yield source share balance is too low")]
    InsufficientYieldShares,

    // Arithmetic

    #[msg("Arithmetic overflow occurred")]
    Overflow,

    #[msg("Arithmetic underflow occurred")]
    Underflow,

    #[msg("Division by zero attempted")]
    DivisionByZero,

    #[msg("Tick is outside the supported range")]
    TickOutOfRange,
}
