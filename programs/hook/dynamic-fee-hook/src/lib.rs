// Dynamic Fee Hook Program
//
// Dynamic-fee controller for a hooked AMM pool, plus the JIT liquidity
// rehypothecation engine the host pool manager drives through callbacks.
//
// Instructions:
// - initialize_hook: Create the hook config (owner, poker, global rate)
// - set_global_max_adj_rate / set_poker: Owner configuration
// - pause / unpause: Emergency pause mechanism
// - activate_and_configure_pool: One-time pool setup, pushes the initial fee
// - activate_pool / deactivate_pool: Toggle a configured pool
// - set_pool_params: Replace the fee policy
// - poke: Apply an activity ratio observation (cooldown-gated)
// - compute_fee_update: Preview a poke without applying it

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod fee_engine;
pub mod instructions;
pub mod interfaces;
pub mod math;
pub mod rehypothecation;
pub mod state;

use instructions::*;
use state::{FeeUpdate, FeeUpdatePreview, PoolParams};

declare_id!("2NztCGVbMGJjxLNBsqZwuhwGqiTzpeagNzbZDWqMqxTc");

#[program]
pub mod dynamic_fee_hook {
    use super::*;

    pub fn initialize_hook(ctx: Context<InitializeHook>, global_max_adj_rate: u128) -> Result<()> {
        ctx.accounts.initialize_hook(global_max_adj_rate, &ctx.bumps)
    }

    pub fn set_global_max_adj_rate(ctx: Context<SetGlobalMaxAdjRate>, rate: u128) -> Result<()> {
        ctx.accounts.set_global_max_adj_rate(rate)
    }

    pub fn set_poker(ctx: Context<SetPoker>, poker: Pubkey) -> Result<()> {
        ctx.accounts.set_poker(poker)
    }

    pub fn pause(ctx: Context<PauseHook>) -> Result<()> {
        ctx.accounts.pause()
    }

    pub fn unpause(ctx: Context<UnpauseHook>) -> Result<()> {
        ctx.accounts.unpause()
    }

    pub fn activate_and_configure_pool(
        ctx: Context<ActivateAndConfigurePool>,
        pool: Pubkey,
        params: PoolParams,
        initial_fee: u32,
        initial_target_ratio: u128,
    ) -> Result<()> {
        ctx.accounts.activate_and_configure_pool(
            pool,
            params,
            initial_fee,
            initial_target_ratio,
            &ctx.bumps,
        )
    }

    pub fn activate_pool(ctx: Context<ActivatePool>) -> Result<()> {
        ctx.accounts.activate_pool()
    }

    pub fn deactivate_pool(ctx: Context<DeactivatePool>) -> Result<()> {
        ctx.accounts.deactivate_pool()
    }

    pub fn set_pool_params(ctx: Context<SetPoolParams>, params: PoolParams) -> Result<()> {
        ctx.accounts.set_pool_params(params)
    }

    pub fn poke(ctx: Context<Poke>, current_ratio: u128) -> Result<FeeUpdate> {
        ctx.accounts.poke(current_ratio)
    }

    pub fn compute_fee_update(
        ctx: Context<ComputeFeeUpdate>,
        current_ratio: u128,
    ) -> Result<FeeUpdatePreview> {
        ctx.accounts.compute_fee_update(current_ratio)
    }
}
