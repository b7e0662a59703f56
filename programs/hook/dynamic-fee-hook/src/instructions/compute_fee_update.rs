// Compute Fee Update Instruction
//
// Read-only preview of what poke would do with the same ratio. The result
// is returned as instruction return data.

use anchor_lang::prelude::*;

use crate::{constants::*, fee_engine::DynamicFeeEngine, state::*};

#[derive(Accounts)]
pub struct ComputeFeeUpdate<'info> {
    #[account(
        seeds = [HOOK_CONFIG_SEED],
        bump = hook_config.bump,
    )]
    pub hook_config: Account<'info, HookConfig>,

    #[account(
        seeds = [POOL_STATE_SEED, pool_state.pool.as_ref()],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,

    #[account(
        seeds = [FEE_SLOT_SEED, pool_state.key().as_ref()],
        bump = fee_slot.bump,
    )]
    pub fee_slot: Account<'info, PoolFeeSlot>,
}

impl<'info> ComputeFeeUpdate<'info> {
    pub fn compute_fee_update(&self, current_ratio: u128) -> Result<FeeUpdatePreview> {
        let now = Clock::get()?.unix_timestamp;
        self.pool_state.compute_fee_update(
            &DynamicFeeEngine,
            current_ratio,
            self.hook_config.global_max_adj_rate,
            now,
            &*self.fee_slot,
        )
    }
}
