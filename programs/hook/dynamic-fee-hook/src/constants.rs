// Hook Program Constants
//
// Global bounds form the outermost envelope around PoolParams validation.
// They are compile-time only; nothing here is owner-settable.

// PDA seeds
pub const HOOK_CONFIG_SEED: &[u8] = b"hook_config";
pub const POOL_STATE_SEED: &[u8] = b"pool_state";
pub const FEE_SLOT_SEED: &[u8] = b"fee_slot";
pub const ANCHOR_DISCRIMINATOR: usize = 8;

// Fixed-point scale for ratios, tolerances, slopes and factors (1.0 = 1e18)
pub const WAD: u128 = 1_000_000_000_000_000_000;

// Fees are expressed in hundredths of a bip (1_000_000 = 100%)
pub const MIN_FEE: u32 = 1;
pub const MAX_FEE: u32 = 1_000_000;

// Marks a pool key whose LP fee is driven by its hook
pub const DYNAMIC_FEE_FLAG: u32 = 0x80_0000;

// Cooldown between pokes, in seconds
pub const MIN_PERIOD: u64 = 60;
pub const MAX_PERIOD: u64 = 2_592_000; // 30 days

// EMA smoothing window, in pokes
pub const MIN_LOOKBACK_PERIOD: u64 = 2;
pub const MAX_LOOKBACK_PERIOD: u64 = 365;

// Half-width of the in-bounds band, as a fraction of the target ratio
pub const MIN_RATIO_TOLERANCE: u128 = 1_000_000_000_000_000; // 0.1%
pub const MAX_RATIO_TOLERANCE: u128 = WAD; // 100%

// Band for linear slope and side factors: [0.1x, 10x]
pub const MIN_MULTIPLIER: u128 = WAD / 10;
pub const MAX_MULTIPLIER: u128 = WAD * 10;

// Ceiling for any reported activity ratio
pub const MAX_CURRENT_RATIO: u128 = 1_000_000 * WAD;

// Ceiling for the global per-poke adjustment rate
pub const MAX_ADJUSTMENT_RATE: u128 = WAD * 10;

// Consecutive same-side hits stop amplifying the fee step past this
pub const MAX_STREAK_MULTIPLIER: u32 = 5;

// Target ratio never drops to zero
pub const MIN_TARGET_RATIO: u128 = 1;

// Dust margins, always in the protocol's favour
pub const JIT_LIQUIDITY_MARGIN: u128 = 1;
pub const SHARE_CONVERSION_MARGIN: u128 = 1;
pub const FIRST_DEPOSIT_MARGIN: u128 = 1;

// Tick bounds of the host pool manager
pub const MIN_TICK: i32 = -887_272;
pub const MAX_TICK: i32 = 887_272;
pub const MIN_TICK_SPACING: i32 = 1;
pub const MAX_TICK_SPACING: i32 = 32_767;
